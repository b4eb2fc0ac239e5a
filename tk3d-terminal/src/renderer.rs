/// ASCII rasterizer for terminal rendering
use std::collections::HashMap;
use std::io::Write;

use crossterm::{
    cursor,
    style::{Color as TermColor, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::{Matrix3, Matrix4, Vector3};
use tk3d_core::{Color, DrawMode, Mesh, MeshDrawer, MeshKind, Projection, Triangle};

/// Character luminosity ramp for shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &['.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Lowest color scale applied to a lit face
const AMBIENT: f32 = 0.35;

/// Screen-space vertex: x, y in cells, depth in NDC
type ScreenPoint = (f32, f32, f32);

/// Character, color and depth buffers for one frame
struct Canvas {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    char_buffer: Vec<char>,
    color_buffer: Vec<Color>,
}

impl Canvas {
    fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; size],
            char_buffer: vec![' '; size],
            color_buffer: vec![Color::BLACK; size],
        }
    }

    fn clear(&mut self) {
        self.depth_buffer.fill(f32::INFINITY);
        self.char_buffer.fill(' ');
        self.color_buffer.fill(Color::BLACK);
    }

    /// Depth-tested write of one cell
    fn plot(&mut self, x: i32, y: i32, depth: f32, character: char, color: Color) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let idx = y as usize * self.width + x as usize;
        if depth < self.depth_buffer[idx] {
            self.depth_buffer[idx] = depth;
            self.char_buffer[idx] = character;
            self.color_buffer[idx] = color;
        }
    }

    fn rasterize_triangle(&mut self, coords: &[ScreenPoint; 3], character: char, color: Color) {
        let [v0, v1, v2] = *coords;

        // Bounding box, clipped to screen bounds
        let min_x = (v0.0.min(v1.0).min(v2.0).floor() as i32).max(0);
        let max_x = (v0.0.max(v1.0).max(v2.0).ceil() as i32).min(self.width as i32 - 1);
        let min_y = (v0.1.min(v1.1).min(v2.1).floor() as i32).max(0);
        let max_y = (v0.1.max(v1.1).max(v2.1).ceil() as i32).min(self.height as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;

                if let Some((w0, w1, w2)) =
                    barycentric((v0.0, v0.1), (v1.0, v1.1), (v2.0, v2.1), (px, py))
                {
                    if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                        let depth = w0 * v0.2 + w1 * v1.2 + w2 * v2.2;
                        self.plot(x, y, depth, character, color);
                    }
                }
            }
        }
    }

    /// DDA line with interpolated depth
    fn draw_line(&mut self, a: ScreenPoint, b: ScreenPoint, color: Color) {
        let (dx, dy) = (b.0 - a.0, b.1 - a.1);
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0);
        if steps > (self.width + self.height) as f32 * 4.0 {
            return;
        }

        let character = edge_char(dx, dy);
        for i in 0..=steps as i32 {
            let t = i as f32 / steps;
            let x = a.0 + dx * t;
            let y = a.1 + dy * t;
            let depth = a.2 + (b.2 - a.2) * t;
            // Edges win ties against faces drawn at the same depth
            self.plot(x.floor() as i32, y.floor() as i32, depth - 1e-4, character, color);
        }
    }

    fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let mut current: Option<(u8, u8, u8)> = None;
        for y in 0..self.height {
            writer.queue(cursor::MoveTo(0, y as u16))?;
            for x in 0..self.width {
                let idx = y * self.width + x;
                let rgb = self.color_buffer[idx].to_rgb8();
                if current != Some(rgb) {
                    let (r, g, b) = rgb;
                    writer.queue(SetForegroundColor(TermColor::Rgb { r, g, b }))?;
                    current = Some(rgb);
                }
                writer.queue(Print(self.char_buffer[idx]))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Terminal `MeshDrawer`: projects unit meshes and rasterizes them into
/// ASCII cells, flat shaded or as wireframe
pub struct AsciiRenderer {
    canvas: Canvas,
    meshes: HashMap<MeshKind, Mesh>,
    pub projection: Projection,
    pub mode: DrawMode,
}

impl AsciiRenderer {
    /// Terminal cells are about twice as tall as they are wide, which the
    /// projection aspect accounts for
    pub fn new(width: usize, height: usize) -> Self {
        let meshes = MeshKind::ALL
            .iter()
            .map(|&kind| (kind, Mesh::unit(kind)))
            .collect();
        Self {
            canvas: Canvas::new(width, height),
            meshes,
            projection: Projection::new(width as u32, height as u32 * 2),
            mode: DrawMode::default(),
        }
    }

    pub fn width(&self) -> usize {
        self.canvas.width
    }

    pub fn height(&self) -> usize {
        self.canvas.height
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.canvas = Canvas::new(width, height);
        self.projection.aspect = width as f32 / (height.max(1) * 2) as f32;
    }

    pub fn clear(&mut self) {
        self.canvas.clear();
    }

    /// Character at a cell, mostly for inspection in tests
    pub fn char_at(&self, x: usize, y: usize) -> Option<char> {
        (x < self.canvas.width && y < self.canvas.height)
            .then(|| self.canvas.char_buffer[y * self.canvas.width + x])
    }

    /// Queue the frame onto `writer`, one cursor move per row
    pub fn present<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        self.canvas.draw(writer)
    }
}

impl MeshDrawer for AsciiRenderer {
    fn draw(&mut self, kind: MeshKind, transform: &Matrix4<f32>, color: Color) {
        let Some(mesh) = self.meshes.get(&kind) else {
            return;
        };
        let mvp = self.projection.matrix() * transform;
        // Normals go through the inverse transpose so scaled parts shade right
        let normal_matrix = transform
            .fixed_view::<3, 3>(0, 0)
            .into_owned()
            .try_inverse()
            .map(|m| m.transpose());
        let (width, height) = (self.canvas.width as u32, self.canvas.height as u32);

        for triangle in &mesh.triangles {
            let mut screen = [(0.0, 0.0, 0.0); 3];
            let mut clipped = false;
            for (slot, vertex) in screen.iter_mut().zip(&triangle.vertices) {
                match Projection::project_with(&mvp, &vertex.position, width, height) {
                    Some(p) => *slot = p,
                    None => clipped = true,
                }
            }
            if clipped {
                continue;
            }

            match self.mode {
                DrawMode::Solid => {
                    let brightness = normal_matrix
                        .as_ref()
                        .map_or(0.0, |n| view_brightness(n, triangle));
                    let index = (brightness * (LUMINOSITY_RAMP.len() - 1) as f32) as usize;
                    let character = LUMINOSITY_RAMP[index.min(LUMINOSITY_RAMP.len() - 1)];
                    let shade = color.scaled(AMBIENT + (1.0 - AMBIENT) * brightness);
                    self.canvas.rasterize_triangle(&screen, character, shade);
                }
                DrawMode::Wireframe => {
                    for i in 0..3 {
                        self.canvas.draw_line(screen[i], screen[(i + 1) % 3], color);
                    }
                }
            }
        }
    }
}

/// How squarely a face looks at the camera, in [0, 1], from the mean of its
/// vertex normals mapped into view space
fn view_brightness(normal_matrix: &Matrix3<f32>, triangle: &Triangle) -> f32 {
    let mean = triangle
        .vertices
        .iter()
        .fold(Vector3::zeros(), |acc, v| acc + v.normal);
    match (normal_matrix * mean).try_normalize(f32::EPSILON) {
        Some(n) => n.dot(&Vector3::z()).abs(),
        None => 0.0,
    }
}

/// Edge glyph from its screen-space slope
fn edge_char(dx: f32, dy: f32) -> char {
    let (ax, ay) = (dx.abs(), dy.abs());
    if ay * 2.0 < ax {
        '-'
    } else if ax * 2.0 < ay {
        '|'
    } else if (dx > 0.0) == (dy > 0.0) {
        '\\'
    } else {
        '/'
    }
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;
    use tk3d_core::{CameraPreset, Transform, Vertex};

    fn filled_cells(renderer: &AsciiRenderer) -> usize {
        (0..renderer.height())
            .flat_map(|y| (0..renderer.width()).map(move |x| (x, y)))
            .filter(|&(x, y)| renderer.char_at(x, y) != Some(' '))
            .count()
    }

    fn centered_cube(renderer: &mut AsciiRenderer) {
        let view = CameraPreset::Front.view_matrix(10.0);
        let model_view = view * Transform::scale_matrix(12.0, 12.0, 12.0);
        renderer.draw(MeshKind::Cube, &model_view, Color::WHITE);
    }

    #[test]
    fn test_solid_cube_fills_center() {
        let mut renderer = AsciiRenderer::new(40, 20);
        renderer.mode = DrawMode::Solid;
        centered_cube(&mut renderer);

        assert_ne!(renderer.char_at(20, 10), Some(' '));
        assert_eq!(renderer.char_at(0, 0), Some(' '));
    }

    #[test]
    fn test_wireframe_leaves_faces_hollow() {
        let mut solid = AsciiRenderer::new(40, 20);
        solid.mode = DrawMode::Solid;
        centered_cube(&mut solid);

        let mut wire = AsciiRenderer::new(40, 20);
        wire.mode = DrawMode::Wireframe;
        centered_cube(&mut wire);

        let lines = filled_cells(&wire);
        assert!(lines > 0);
        assert!(lines < filled_cells(&solid));
    }

    #[test]
    fn test_clear_empties_buffers() {
        let mut renderer = AsciiRenderer::new(40, 20);
        centered_cube(&mut renderer);
        renderer.clear();
        assert_eq!(filled_cells(&renderer), 0);
    }

    fn flat_triangle(normal: Vector3<f32>) -> Triangle {
        let at = |x: f32, y: f32| Vertex::new(Point3::new(x, y, 0.0), normal);
        Triangle::new(at(0.0, 0.0), at(1.0, 0.0), at(0.0, 1.0))
    }

    #[test]
    fn test_brightness_follows_vertex_normals() {
        let identity = Matrix3::identity();
        let facing = view_brightness(&identity, &flat_triangle(Vector3::z()));
        let edge_on = view_brightness(&identity, &flat_triangle(Vector3::x()));
        assert!((facing - 1.0).abs() < 1e-6);
        assert!(edge_on.abs() < 1e-6);
    }

    #[test]
    fn test_brightness_under_nonuniform_scale() {
        // Normal tilted 45 degrees towards +X; stretching X by 4 tilts the
        // surface towards the camera, so the mapped normal leans to +Z
        let tilted = flat_triangle(Vector3::new(1.0, 0.0, 1.0));
        let stretch = Matrix3::from_diagonal(&Vector3::new(4.0, 1.0, 1.0));
        let normal_matrix = stretch.try_inverse().unwrap().transpose();

        let plain = view_brightness(&Matrix3::identity(), &tilted);
        let stretched = view_brightness(&normal_matrix, &tilted);
        assert!(stretched > plain);
    }

    #[test]
    fn test_barycentric_degenerate_triangle() {
        assert!(barycentric((0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (1.0, 1.0)).is_none());
    }

    #[test]
    fn test_edge_chars() {
        assert_eq!(edge_char(5.0, 0.0), '-');
        assert_eq!(edge_char(0.0, 5.0), '|');
        assert_eq!(edge_char(3.0, 3.0), '\\');
        assert_eq!(edge_char(3.0, -3.0), '/');
    }
}
