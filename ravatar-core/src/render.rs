//! Renderer - Paints an `AvatarDescription` onto an RGBA surface
//!
//! A small CPU rasterizer: capsule-shaped rounded rectangles with analytic
//! anti-aliasing, filled with a solid color or a two-stop linear gradient and
//! composited source-over.

use image::{Rgba, RgbaImage};
use thiserror::Error;

use crate::config::RenderConfig;
use crate::generator::AvatarDescription;
use crate::geometry::{Geometry, Span};
use crate::palette::Color;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("Drawing surface is empty ({0}x{1})")]
    EmptySurface(u32, u32),

    #[error("Drawing surface must be square, got {0}x{1}")]
    NonSquareSurface(u32, u32),
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Point {
    x: f64,
    y: f64,
}

impl Point {
    const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Two-stop gradient along `start -> end`, padded outside the stops.
#[derive(Debug, Clone, Copy, PartialEq)]
struct LinearGradient {
    start: Point,
    end: Point,
    from: Color,
    to: Color,
}

impl LinearGradient {
    fn sample(&self, p: Point) -> [f64; 3] {
        let dx = self.end.x - self.start.x;
        let dy = self.end.y - self.start.y;
        let len2 = dx * dx + dy * dy;
        if len2 == 0.0 {
            return self.to.channels();
        }
        let t = ((p.x - self.start.x) * dx + (p.y - self.start.y) * dy) / len2;
        self.from.lerp(self.to, t)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Paint {
    Solid(Color),
    Linear(LinearGradient),
}

impl Paint {
    fn sample(&self, p: Point) -> [f64; 3] {
        match self {
            Paint::Solid(c) => c.channels(),
            Paint::Linear(g) => g.sample(p),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct RoundedRect {
    x: f64,
    y: f64,
    w: f64,
    h: f64,
    radius: f64,
}

impl RoundedRect {
    fn new(x: f64, y: f64, w: f64, h: f64, radius: f64) -> Self {
        let radius = radius.min(w / 2.0).min(h / 2.0);
        Self { x, y, w, h, radius }
    }

    /// Fraction of a pixel centered on `p` that lies inside the shape.
    fn coverage(&self, p: Point) -> f64 {
        let half_w = self.w / 2.0;
        let half_h = self.h / 2.0;
        let qx = (p.x - (self.x + half_w)).abs() - (half_w - self.radius);
        let qy = (p.y - (self.y + half_h)).abs() - (half_h - self.radius);
        let outside = qx.max(0.0).hypot(qy.max(0.0));
        let inside = qx.max(qy).min(0.0);
        let distance = outside + inside - self.radius;
        (0.5 - distance).clamp(0.0, 1.0)
    }
}

/// User space -> device space. Vertical avatars are drawn rotated 90 degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Orientation {
    Horizontal,
    Vertical { size: f64 },
}

impl Orientation {
    fn to_user(self, device: Point) -> Point {
        match self {
            Orientation::Horizontal => device,
            Orientation::Vertical { size } => Point::new(size - device.y, device.x),
        }
    }

    /// Device-space bounding box `(x0, y0, x1, y1)` of a user-space rect.
    fn device_bounds(self, r: &RoundedRect) -> (f64, f64, f64, f64) {
        match self {
            Orientation::Horizontal => (r.x, r.y, r.x + r.w, r.y + r.h),
            Orientation::Vertical { size } => (r.y, size - (r.x + r.w), r.y + r.h, size - r.x),
        }
    }
}

pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Render onto a fresh `size x size` surface taken from the config.
    pub fn render(&self, description: &AvatarDescription) -> Result<RgbaImage, RenderError> {
        let size = self.config.size;
        if size == 0 {
            return Err(RenderError::EmptySurface(size, size));
        }
        let mut surface = RgbaImage::new(size, size);
        self.render_onto(&mut surface, description)?;
        Ok(surface)
    }

    /// Render onto a caller-supplied surface. Geometry follows the surface
    /// size, not the config. Every pixel is overwritten.
    pub fn render_onto(
        &self,
        surface: &mut RgbaImage,
        description: &AvatarDescription,
    ) -> Result<(), RenderError> {
        let (w, h) = surface.dimensions();
        if w == 0 || h == 0 {
            return Err(RenderError::EmptySurface(w, h));
        }
        if w != h {
            return Err(RenderError::NonSquareSurface(w, h));
        }

        let geometry = Geometry::new(w);
        self.fill_canvas(surface, &geometry);

        let orientation = if description.is_vertical() {
            Orientation::Vertical { size: geometry.size }
        } else {
            Orientation::Horizontal
        };

        let shapes = self.scene(description, &geometry);
        log::trace!("rasterizing {} shapes at {}px", shapes.len(), w);
        for (shape, paint) in &shapes {
            fill_shape(surface, orientation, shape, paint);
        }
        Ok(())
    }

    fn fill_canvas(&self, surface: &mut RgbaImage, geometry: &Geometry) {
        let background = LinearGradient {
            start: Point::new(0.0, geometry.size),
            end: Point::new(geometry.size, 0.0),
            from: self.config.canvas_low,
            to: self.config.canvas_high,
        };
        for (x, y, pixel) in surface.enumerate_pixels_mut() {
            let [r, g, b] = background.sample(pixel_center(x, y));
            *pixel = Rgba([to_u8(r), to_u8(g), to_u8(b), 255]);
        }
    }

    /// Shapes in user space, in paint order.
    fn scene(&self, description: &AvatarDescription, geometry: &Geometry) -> Vec<(RoundedRect, Paint)> {
        let colors = description.gradient_set().colors();
        let along_row = |from: Color, to: Color| {
            Paint::Linear(LinearGradient {
                start: Point::new(0.0, 0.0),
                end: Point::new(geometry.length, 0.0),
                from,
                to,
            })
        };
        let dark_layer = along_row(colors.bg_low, colors.bg_high);
        let light_layer = along_row(colors.low, colors.high);
        let neutral = Paint::Solid(self.config.node_fill);

        let shape = |top: f64, span: &Span| {
            RoundedRect::new(
                geometry.padding + span.offset,
                top,
                span.length,
                geometry.width,
                geometry.corner_radius(),
            )
        };

        let mut shapes = Vec::with_capacity(2 * description.rows().len() + description.total_nodes());
        for (index, (row, flags)) in description.row_nodes().enumerate() {
            let top = geometry.row_top(index);
            let layout = geometry.row_layout(row);
            if let Some(background) = &layout.background {
                shapes.push((shape(top, background), dark_layer));
            }
            for (span, &colored) in layout.nodes.iter().zip(flags) {
                let paint = if colored { light_layer } else { neutral };
                shapes.push((shape(top, span), paint));
            }
        }
        shapes
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(RenderConfig::default())
    }
}

fn fill_shape(surface: &mut RgbaImage, orientation: Orientation, shape: &RoundedRect, paint: &Paint) {
    let (width, height) = surface.dimensions();
    let (x0, y0, x1, y1) = orientation.device_bounds(shape);
    let clamp_x = |v: f64| (v.max(0.0) as u32).min(width);
    let clamp_y = |v: f64| (v.max(0.0) as u32).min(height);
    let (px0, px1) = (clamp_x(x0.floor() - 1.0), clamp_x(x1.ceil() + 1.0));
    let (py0, py1) = (clamp_y(y0.floor() - 1.0), clamp_y(y1.ceil() + 1.0));

    for py in py0..py1 {
        for px in px0..px1 {
            let user = orientation.to_user(pixel_center(px, py));
            let alpha = shape.coverage(user);
            if alpha <= 0.0 {
                continue;
            }
            let src = paint.sample(user);
            let dst = surface.get_pixel_mut(px, py);
            for (channel, value) in dst.0.iter_mut().take(3).zip(src) {
                *channel = to_u8(value * alpha + f64::from(*channel) * (1.0 - alpha));
            }
        }
    }
}

fn pixel_center(x: u32, y: u32) -> Point {
    Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5)
}

fn to_u8(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}
