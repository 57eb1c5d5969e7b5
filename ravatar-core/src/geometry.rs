//! Canvas Geometry
//!
//! Every measurement is a fixed ratio of the canvas size. None of it varies
//! between avatars.

use crate::rows::RowKind;

/// A horizontal run inside a row, measured from the row's left edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub offset: f64,
    pub length: f64,
}

impl Span {
    const fn new(offset: f64, length: f64) -> Self {
        Self { offset, length }
    }
}

/// Background strip (if any) and node spans of one row, in draw order.
#[derive(Debug, Clone, PartialEq)]
pub struct RowLayout {
    pub background: Option<Span>,
    pub nodes: Vec<Span>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    /// Canvas edge length.
    pub size: f64,
    /// Inset of the avatar from every canvas edge.
    pub padding: f64,
    /// Full row length.
    pub length: f64,
    /// Gap between adjacent nodes and between rows.
    pub margin: f64,
    /// Row thickness; also the length of a dot.
    pub width: f64,
    pub half_line: f64,
}

impl Geometry {
    pub fn new(size: u32) -> Self {
        let size = f64::from(size);
        let padding = size / 6.0;
        let length = 4.0 * (size / 6.0);
        let unit = length / 3.0 / 4.0;
        Self {
            size,
            padding,
            length,
            margin: 1.5 * unit,
            width: length / 4.0,
            half_line: length * (2.0 / 3.0) - 0.5 * unit,
        }
    }

    /// Top edge of row `index`.
    pub fn row_top(&self, index: usize) -> f64 {
        self.padding + (self.width + self.margin) * index as f64
    }

    /// Distance from one dot slot to the next.
    pub fn step(&self) -> f64 {
        self.width + self.margin
    }

    /// Every shape is a capsule: radius is half the row thickness.
    pub fn corner_radius(&self) -> f64 {
        self.width / 2.0
    }

    pub fn row_layout(&self, kind: RowKind) -> RowLayout {
        let (length, width, half, step) = (self.length, self.width, self.half_line, self.step());
        let dot = |slot: f64| Span::new(slot * step, width);

        let (background, nodes) = match kind {
            RowKind::Line => (None, vec![Span::new(0.0, length)]),
            RowKind::LineDot => (
                Some(Span::new(0.0, length)),
                vec![Span::new(0.0, half), Span::new(half + self.margin, width)],
            ),
            RowKind::DotLine => (
                Some(Span::new(0.0, length)),
                vec![dot(0.0), Span::new(step, half)],
            ),
            RowKind::DotDotDot => (
                Some(Span::new(0.0, length)),
                vec![dot(0.0), dot(1.0), dot(2.0)],
            ),
            RowKind::DotSpaceDot => (
                Some(Span::new(0.0, length)),
                vec![dot(0.0), dot(2.0)],
            ),
            RowKind::DotDotSpace => (
                Some(Span::new(0.0, half)),
                vec![dot(0.0), dot(1.0)],
            ),
            RowKind::SpaceDotDot => (
                Some(Span::new(step, half)),
                vec![dot(1.0), dot(2.0)],
            ),
            RowKind::SpaceLine => (None, vec![Span::new(step, half)]),
            RowKind::LineSpace => (None, vec![Span::new(0.0, half)]),
        };

        RowLayout { background, nodes }
    }
}
