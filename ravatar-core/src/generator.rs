//! Property Generator
//!
//! Turns a seed into an `AvatarDescription`. The order of draws from the
//! stream is fixed: orientation, three rows, gradient set, one draw per node,
//! then one extra draw only when no node came out colored.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::palette::GradientSet;
use crate::random::SeededRandomStream;
use crate::rows::RowKind;
use crate::validation::{ValidationResult, Validator};

pub const ROW_COUNT: usize = 3;

const VERTICAL_THRESHOLD: f64 = 0.5;
const COLORED_THRESHOLD: f64 = 0.65;

#[derive(Debug, Error)]
#[error("Invalid avatar description: {}", .0.summary())]
pub struct DescriptionError(pub ValidationResult);

/// Raw fields of a description before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescriptionParts {
    pub is_vertical: bool,
    pub rows: [RowKind; ROW_COUNT],
    pub gradient_set: GradientSet,
    pub colored_nodes: Vec<bool>,
}

/// Everything needed to draw one avatar.
///
/// Always satisfies: one colored flag per node, and at least one flag set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "DescriptionParts")]
pub struct AvatarDescription {
    is_vertical: bool,
    rows: [RowKind; ROW_COUNT],
    gradient_set: GradientSet,
    colored_nodes: Vec<bool>,
}

impl AvatarDescription {
    /// Deterministic description for `seed`.
    pub fn generate(seed: &str) -> Self {
        let mut stream = SeededRandomStream::new(seed);
        let description = Self::generate_from_stream(&mut stream);
        log::debug!(
            "generated avatar for {:?}: vertical={} rows={:?} gradient={}",
            seed,
            description.is_vertical,
            description.rows.map(RowKind::name),
            description.gradient_set.name()
        );
        description
    }

    /// Runs the generation algorithm against a caller-owned stream.
    pub fn generate_from_stream(stream: &mut SeededRandomStream) -> Self {
        let is_vertical = stream.next_bool(VERTICAL_THRESHOLD);

        let mut rows = [RowKind::Line; ROW_COUNT];
        for row in rows.iter_mut() {
            *row = RowKind::ALL[stream.next_index(RowKind::ALL.len())];
        }

        let gradient_set = GradientSet::ALL[stream.next_index(GradientSet::ALL.len())];

        let total_nodes: usize = rows.iter().map(|r| r.node_count()).sum();
        let mut colored_nodes: Vec<bool> = (0..total_nodes)
            .map(|_| stream.next_bool(COLORED_THRESHOLD))
            .collect();

        if !colored_nodes.contains(&true) {
            let forced = stream.next_index(total_nodes);
            log::debug!("no node colored, forcing node {} of {}", forced, total_nodes);
            colored_nodes[forced] = true;
        }

        Self {
            is_vertical,
            rows,
            gradient_set,
            colored_nodes,
        }
    }

    /// Build from raw parts, rejecting anything that breaks the invariants.
    pub fn from_parts(parts: DescriptionParts) -> Result<Self, DescriptionError> {
        let result = Validator::new().validate(&parts);
        if !result.valid {
            return Err(DescriptionError(result));
        }
        Ok(Self {
            is_vertical: parts.is_vertical,
            rows: parts.rows,
            gradient_set: parts.gradient_set,
            colored_nodes: parts.colored_nodes,
        })
    }

    pub fn is_vertical(&self) -> bool {
        self.is_vertical
    }

    pub fn rows(&self) -> &[RowKind; ROW_COUNT] {
        &self.rows
    }

    pub fn gradient_set(&self) -> GradientSet {
        self.gradient_set
    }

    /// One flag per node, rows concatenated top to bottom.
    pub fn colored_nodes(&self) -> &[bool] {
        &self.colored_nodes
    }

    pub fn total_nodes(&self) -> usize {
        self.colored_nodes.len()
    }

    /// Each row paired with the colored flags of its own nodes.
    pub fn row_nodes(&self) -> impl Iterator<Item = (RowKind, &[bool])> + '_ {
        let mut offset = 0;
        self.rows.iter().map(move |&row| {
            let flags = &self.colored_nodes[offset..offset + row.node_count()];
            offset += row.node_count();
            (row, flags)
        })
    }
}

impl TryFrom<DescriptionParts> for AvatarDescription {
    type Error = DescriptionError;

    fn try_from(parts: DescriptionParts) -> Result<Self, Self::Error> {
        Self::from_parts(parts)
    }
}

impl From<AvatarDescription> for DescriptionParts {
    fn from(d: AvatarDescription) -> Self {
        Self {
            is_vertical: d.is_vertical,
            rows: d.rows,
            gradient_set: d.gradient_set,
            colored_nodes: d.colored_nodes,
        }
    }
}

/// Deterministic description for `seed`.
pub fn generate(seed: &str) -> AvatarDescription {
    AvatarDescription::generate(seed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rows::RowKind::*;

    fn expect(seed: &str, vertical: bool, rows: [RowKind; 3], gradient: GradientSet, colored: &[u8]) {
        let d = generate(seed);
        let colored: Vec<bool> = colored.iter().map(|&c| c == 1).collect();
        assert_eq!(d.is_vertical(), vertical, "orientation for {seed:?}");
        assert_eq!(d.rows(), &rows, "rows for {seed:?}");
        assert_eq!(d.gradient_set(), gradient, "gradient for {seed:?}");
        assert_eq!(d.colored_nodes(), colored.as_slice(), "colored for {seed:?}");
    }

    #[test]
    fn test_golden_empty_seed() {
        expect("", true, [Line, DotDotSpace, Line], GradientSet::LightBlue, &[0, 1, 0, 0]);
    }

    #[test]
    fn test_golden_case_sensitive_seeds() {
        expect("alice", true, [LineSpace, SpaceDotDot, SpaceLine], GradientSet::Purple, &[0, 0, 1, 0]);
        expect("Alice", false, [Line, LineSpace, LineDot], GradientSet::LightBlue, &[0, 1, 1, 0]);
    }

    #[test]
    fn test_golden_non_ascii_seed() {
        expect("héllo 🦀", true, [Line, LineSpace, DotDotDot], GradientSet::Red, &[0, 0, 1, 0, 0]);
    }

    #[test]
    fn test_golden_forced_coloring() {
        // Neither seed colors a node in the per-node pass.
        expect("seed-0", true, [Line, DotLine, DotDotDot], GradientSet::Lime, &[0, 1, 0, 0, 0, 0]);
        expect("seed-35", false, [DotSpaceDot, SpaceLine, Line], GradientSet::Gold, &[0, 0, 0, 1]);
    }

    #[test]
    fn test_forced_coloring_consumes_one_extra_draw() {
        let mut stream = SeededRandomStream::new("seed-0");
        let _ = AvatarDescription::generate_from_stream(&mut stream);
        // 1 orientation + 3 rows + 1 gradient + 6 nodes + 1 forced
        let mut replay = SeededRandomStream::new("seed-0");
        for _ in 0..12 {
            replay.next_u32();
        }
        assert_eq!(stream, replay);
    }

    #[test]
    fn test_row_nodes_split() {
        let d = generate("seed-0");
        let split: Vec<_> = d.row_nodes().map(|(row, flags)| (row, flags.to_vec())).collect();
        assert_eq!(
            split,
            vec![
                (Line, vec![false]),
                (DotLine, vec![true, false]),
                (DotDotDot, vec![false, false, false]),
            ]
        );
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(generate("")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "isVertical": true,
                "rows": ["LINE", "DOT_DOT_SPACE", "LINE"],
                "gradientSet": "light_blue",
                "coloredNodes": [false, true, false, false],
            })
        );
    }

    #[test]
    fn test_deserialize_validates() {
        let ok = r#"{"isVertical":false,"rows":["LINE","LINE","LINE"],"gradientSet":"gold","coloredNodes":[true,false,false]}"#;
        let d: AvatarDescription = serde_json::from_str(ok).unwrap();
        assert_eq!(d.total_nodes(), 3);

        let short = r#"{"isVertical":false,"rows":["LINE","LINE","LINE"],"gradientSet":"gold","coloredNodes":[true]}"#;
        let err = serde_json::from_str::<AvatarDescription>(short).unwrap_err();
        assert!(err.to_string().contains("node_count"));

        let two_rows = r#"{"isVertical":false,"rows":["LINE","LINE"],"gradientSet":"gold","coloredNodes":[true,true]}"#;
        assert!(serde_json::from_str::<AvatarDescription>(two_rows).is_err());
    }

    #[test]
    fn test_from_parts_rejects_uncolored() {
        let parts = DescriptionParts {
            is_vertical: true,
            rows: [Line, Line, Line],
            gradient_set: GradientSet::Red,
            colored_nodes: vec![false; 3],
        };
        let err = AvatarDescription::from_parts(parts).unwrap_err();
        assert!(!err.0.valid);
        assert_eq!(err.0.violations[0].rule, "colored_coverage");
    }
}
