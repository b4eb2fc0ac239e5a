/// Unit primitive meshes for the scene's parts
///
/// Every primitive is centered on the origin and fits the unit box
/// [-0.5, 0.5]³. Parts size them with a scale op.
use std::f32::consts::{PI, TAU};

use nalgebra::{Point3, Vector3};

use crate::transform::normalize_or_zero;

/// Tube radius of the unit torus; its ring radius is `0.5 - UNIT_TORUS_MINOR`
pub const UNIT_TORUS_MINOR: f32 = 0.15;

/// Kind of unit mesh a part is drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshKind {
    Cube,
    Sphere,
    /// Ring in the XZ plane, axis along Y
    Torus,
    /// Axis along Y
    Cylinder,
    /// Triangular cross-section in XY, extruded along Z
    Prism,
}

impl MeshKind {
    pub const ALL: [MeshKind; 5] = [
        MeshKind::Cube,
        MeshKind::Sphere,
        MeshKind::Torus,
        MeshKind::Cylinder,
        MeshKind::Prism,
    ];

    /// Stable index, used when draw calls are flattened for a host
    pub fn index(self) -> usize {
        match self {
            MeshKind::Cube => 0,
            MeshKind::Sphere => 1,
            MeshKind::Torus => 2,
            MeshKind::Cylinder => 3,
            MeshKind::Prism => 4,
        }
    }
}

/// A 3D vertex with position and normal
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    pub position: Point3<f32>,
    pub normal: Vector3<f32>,
}

impl Vertex {
    pub fn new(position: Point3<f32>, normal: Vector3<f32>) -> Self {
        Self { position, normal }
    }
}

/// A triangle face defined by three vertices
#[derive(Debug, Clone)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
}

impl Triangle {
    pub fn new(v0: Vertex, v1: Vertex, v2: Vertex) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    /// Face normal from the vertex positions; zero for degenerate faces
    pub fn calculate_normal(&self) -> Vector3<f32> {
        let [v0, v1, v2] = self.vertices.map(|v| v.position);
        normalize_or_zero((v1 - v0).cross(&(v2 - v0)))
    }
}

/// A 3D mesh composed of triangles
#[derive(Debug, Clone)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            triangles: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
        }
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    /// Flat-shaded triangle from three positions
    fn add_face(&mut self, a: Point3<f32>, b: Point3<f32>, c: Point3<f32>) {
        let zero = Vector3::zeros();
        let mut triangle = Triangle::new(
            Vertex::new(a, zero),
            Vertex::new(b, zero),
            Vertex::new(c, zero),
        );
        let normal = triangle.calculate_normal();
        for vertex in &mut triangle.vertices {
            vertex.normal = normal;
        }
        self.add_triangle(triangle);
    }

    /// Two triangles for the counter-clockwise quad `a b c d`
    fn add_quad(&mut self, a: Point3<f32>, b: Point3<f32>, c: Point3<f32>, d: Point3<f32>) {
        self.add_face(a, b, c);
        self.add_face(a, c, d);
    }

    /// Unit mesh for a part kind
    pub fn unit(kind: MeshKind) -> Self {
        match kind {
            MeshKind::Cube => Self::cube(1.0),
            MeshKind::Sphere => Self::sphere(16, 8),
            MeshKind::Torus => Self::torus(0.5 - UNIT_TORUS_MINOR, UNIT_TORUS_MINOR, 20, 8),
            MeshKind::Cylinder => Self::cylinder(16),
            MeshKind::Prism => Self::prism(),
        }
    }

    /// Axis-aligned cube with edge length `size`
    pub fn cube(size: f32) -> Self {
        let h = size / 2.0;
        let p = |x: f32, y: f32, z: f32| Point3::new(x * h, y * h, z * h);
        let mut mesh = Self::with_capacity(12);

        // +Z, -Z
        mesh.add_quad(p(-1., -1., 1.), p(1., -1., 1.), p(1., 1., 1.), p(-1., 1., 1.));
        mesh.add_quad(p(1., -1., -1.), p(-1., -1., -1.), p(-1., 1., -1.), p(1., 1., -1.));
        // +Y, -Y
        mesh.add_quad(p(-1., 1., 1.), p(1., 1., 1.), p(1., 1., -1.), p(-1., 1., -1.));
        mesh.add_quad(p(-1., -1., -1.), p(1., -1., -1.), p(1., -1., 1.), p(-1., -1., 1.));
        // +X, -X
        mesh.add_quad(p(1., -1., 1.), p(1., -1., -1.), p(1., 1., -1.), p(1., 1., 1.));
        mesh.add_quad(p(-1., -1., -1.), p(-1., -1., 1.), p(-1., 1., 1.), p(-1., 1., -1.));

        mesh
    }

    /// UV sphere of diameter 1
    pub fn sphere(segments: u32, rings: u32) -> Self {
        let at = |ring: u32, seg: u32| {
            let phi = PI * ring as f32 / rings as f32;
            let theta = TAU * seg as f32 / segments as f32;
            let dir = Vector3::new(phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin());
            Vertex::new(Point3::from(dir * 0.5), dir)
        };

        let mut mesh = Self::with_capacity((segments * rings * 2) as usize);
        for ring in 0..rings {
            for seg in 0..segments {
                let a = at(ring, seg);
                let b = at(ring, seg + 1);
                let c = at(ring + 1, seg + 1);
                let d = at(ring + 1, seg);
                if ring != 0 {
                    mesh.add_triangle(Triangle::new(a, b, d));
                }
                if ring + 1 != rings {
                    mesh.add_triangle(Triangle::new(b, c, d));
                }
            }
        }
        mesh
    }

    /// Torus around the Y axis; `major + minor` should be 0.5 for a unit fit
    pub fn torus(major: f32, minor: f32, segments: u32, sides: u32) -> Self {
        let at = |seg: u32, side: u32| {
            let u = TAU * seg as f32 / segments as f32;
            let v = TAU * side as f32 / sides as f32;
            let ring_dir = Vector3::new(u.cos(), 0.0, u.sin());
            let normal = ring_dir * v.cos() + Vector3::y() * v.sin();
            let position = Point3::from(ring_dir * major + normal * minor);
            Vertex::new(position, normal)
        };

        let mut mesh = Self::with_capacity((segments * sides * 2) as usize);
        for seg in 0..segments {
            for side in 0..sides {
                let a = at(seg, side);
                let b = at(seg + 1, side);
                let c = at(seg + 1, side + 1);
                let d = at(seg, side + 1);
                mesh.add_triangle(Triangle::new(a, d, c));
                mesh.add_triangle(Triangle::new(a, c, b));
            }
        }
        mesh
    }

    /// Capped cylinder of diameter 1 and height 1
    pub fn cylinder(segments: u32) -> Self {
        let rim = |seg: u32, y: f32| {
            let theta = TAU * seg as f32 / segments as f32;
            Point3::new(0.5 * theta.cos(), y, 0.5 * theta.sin())
        };
        let top = Point3::new(0.0, 0.5, 0.0);
        let bottom = Point3::new(0.0, -0.5, 0.0);

        let mut mesh = Self::with_capacity((segments * 4) as usize);
        for seg in 0..segments {
            let (b0, b1) = (rim(seg, -0.5), rim(seg + 1, -0.5));
            let (t0, t1) = (rim(seg, 0.5), rim(seg + 1, 0.5));
            mesh.add_quad(b0, t0, t1, b1);
            mesh.add_face(top, t1, t0);
            mesh.add_face(bottom, b0, b1);
        }
        mesh
    }

    /// Wedge: isosceles triangle in XY (apex up), extruded along Z
    pub fn prism() -> Self {
        let front = [
            Point3::new(-0.5, -0.5, 0.5),
            Point3::new(0.5, -0.5, 0.5),
            Point3::new(0.0, 0.5, 0.5),
        ];
        let back = front.map(|p| Point3::new(p.x, p.y, -0.5));

        let mut mesh = Self::with_capacity(8);
        mesh.add_face(front[0], front[1], front[2]);
        mesh.add_face(back[0], back[2], back[1]);
        for i in 0..3 {
            let j = (i + 1) % 3;
            mesh.add_quad(front[i], back[i], back[j], front[j]);
        }
        mesh
    }

    /// Axis-aligned bounds as (min, max)
    pub fn bounds(&self) -> (Point3<f32>, Point3<f32>) {
        let mut min = Point3::new(f32::INFINITY, f32::INFINITY, f32::INFINITY);
        let mut max = Point3::new(f32::NEG_INFINITY, f32::NEG_INFINITY, f32::NEG_INFINITY);
        for v in self.triangles.iter().flat_map(|t| t.vertices.iter()) {
            min = min.inf(&v.position);
            max = max.sup(&v.position);
        }
        (min, max)
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}
