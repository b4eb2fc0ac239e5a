/// Mesh drawer seam between the scene and a rasterizer
use nalgebra::Matrix4;

use crate::geometry::MeshKind;

/// Flat RGB color, components in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// From 0-255 components
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    pub fn to_rgb8(self) -> (u8, u8, u8) {
        let c = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        (c(self.r), c(self.g), c(self.b))
    }

    /// Same hue scaled by `k`, for simple shading
    pub fn scaled(self, k: f32) -> Self {
        Self::rgb(self.r * k, self.g * k, self.b * k)
    }
}

/// Rasterizes unit meshes.
///
/// `transform` is the full model-view transform current when the part is
/// drawn; the projection is the drawer's own business.
pub trait MeshDrawer {
    fn draw(&mut self, kind: MeshKind, transform: &Matrix4<f32>, color: Color);
}

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    pub kind: MeshKind,
    pub transform: Matrix4<f32>,
    pub color: Color,
}

/// Drawer that records calls instead of rasterizing them
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub calls: Vec<DrawCall>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    /// Calls drawn with the given mesh kind, in draw order
    pub fn of_kind(&self, kind: MeshKind) -> impl Iterator<Item = &DrawCall> {
        self.calls.iter().filter(move |c| c.kind == kind)
    }
}

impl MeshDrawer for DrawList {
    fn draw(&mut self, kind: MeshKind, transform: &Matrix4<f32>, color: Color) {
        self.calls.push(DrawCall {
            kind,
            transform: *transform,
            color,
        });
    }
}

/// Forwards every call while counting them
pub(crate) struct CountingDrawer<'a, D: MeshDrawer + ?Sized> {
    pub inner: &'a mut D,
    pub count: usize,
}

impl<D: MeshDrawer + ?Sized> MeshDrawer for CountingDrawer<'_, D> {
    fn draw(&mut self, kind: MeshKind, transform: &Matrix4<f32>, color: Color) {
        self.count += 1;
        self.inner.draw(kind, transform, color);
    }
}
