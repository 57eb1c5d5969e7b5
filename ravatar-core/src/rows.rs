//! Row Kinds
//!
//! A row is one horizontal band of the avatar. The generator picks a kind by
//! index into `RowKind::ALL`, so that order is part of the avatar identity.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RowKind {
    /// One full-width bar.
    Line,
    /// Long bar, then a dot.
    LineDot,
    /// Dot, then a long bar.
    DotLine,
    /// Three evenly spaced dots.
    DotDotDot,
    /// Two dots with an empty slot between them.
    DotSpaceDot,
    /// Two adjacent dots, trailing gap.
    DotDotSpace,
    /// Leading gap, two adjacent dots.
    SpaceDotDot,
    /// Leading gap, half-width bar.
    SpaceLine,
    /// Half-width bar, trailing gap.
    LineSpace,
}

impl RowKind {
    /// Canonical selection order.
    pub const ALL: [RowKind; 9] = [
        RowKind::Line,
        RowKind::LineDot,
        RowKind::DotLine,
        RowKind::DotDotDot,
        RowKind::DotSpaceDot,
        RowKind::DotDotSpace,
        RowKind::SpaceDotDot,
        RowKind::SpaceLine,
        RowKind::LineSpace,
    ];

    /// Number of drawable nodes in the row.
    pub const fn node_count(self) -> usize {
        match self {
            RowKind::Line | RowKind::SpaceLine | RowKind::LineSpace => 1,
            RowKind::LineDot
            | RowKind::DotLine
            | RowKind::DotSpaceDot
            | RowKind::DotDotSpace
            | RowKind::SpaceDotDot => 2,
            RowKind::DotDotDot => 3,
        }
    }

    /// Whether a background strip is painted beneath the nodes.
    pub const fn has_background(self) -> bool {
        !matches!(self, RowKind::Line | RowKind::SpaceLine | RowKind::LineSpace)
    }

    pub const fn name(self) -> &'static str {
        match self {
            RowKind::Line => "LINE",
            RowKind::LineDot => "LINE_DOT",
            RowKind::DotLine => "DOT_LINE",
            RowKind::DotDotDot => "DOT_DOT_DOT",
            RowKind::DotSpaceDot => "DOT_SPACE_DOT",
            RowKind::DotDotSpace => "DOT_DOT_SPACE",
            RowKind::SpaceDotDot => "SPACE_DOT_DOT",
            RowKind::SpaceLine => "SPACE_LINE",
            RowKind::LineSpace => "LINE_SPACE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_order() {
        let names: Vec<_> = RowKind::ALL.iter().map(|k| k.name()).collect();
        assert_eq!(
            names,
            [
                "LINE",
                "LINE_DOT",
                "DOT_LINE",
                "DOT_DOT_DOT",
                "DOT_SPACE_DOT",
                "DOT_DOT_SPACE",
                "SPACE_DOT_DOT",
                "SPACE_LINE",
                "LINE_SPACE",
            ]
        );
    }

    #[test]
    fn test_attributes() {
        let counts: Vec<_> = RowKind::ALL.iter().map(|k| k.node_count()).collect();
        assert_eq!(counts, [1, 2, 2, 3, 2, 2, 2, 1, 1]);
        let backgrounds: Vec<_> = RowKind::ALL.iter().map(|k| k.has_background()).collect();
        assert_eq!(
            backgrounds,
            [false, true, true, true, true, true, true, false, false]
        );
    }

    #[test]
    fn test_serde_name_matches_name() {
        for kind in RowKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.name()));
        }
    }

    #[test]
    fn test_half_line_variants_stay_distinct() {
        assert_ne!(RowKind::SpaceLine, RowKind::LineSpace);
        assert_eq!(RowKind::SpaceLine.node_count(), RowKind::LineSpace.node_count());
    }
}
