/// Camera presets and projection utilities
use nalgebra::{Matrix4, Point3, Vector3};

/// Fixed viewpoints the scene can be looked at from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CameraPreset {
    /// Axonometric three-quarter view
    #[default]
    Iso,
    /// Looking down -Z
    Front,
    /// Looking straight down
    Top,
    /// Looking down -X
    Profile,
}

impl CameraPreset {
    pub const ALL: [CameraPreset; 4] = [
        CameraPreset::Iso,
        CameraPreset::Front,
        CameraPreset::Top,
        CameraPreset::Profile,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CameraPreset::Iso => "iso",
            CameraPreset::Front => "front",
            CameraPreset::Top => "top",
            CameraPreset::Profile => "profile",
        }
    }

    /// Unit vector from the target towards the eye
    pub fn direction(self) -> Vector3<f32> {
        match self {
            CameraPreset::Iso => Vector3::new(1.0, 1.0, 1.0).normalize(),
            CameraPreset::Front => Vector3::z(),
            CameraPreset::Top => Vector3::y(),
            CameraPreset::Profile => Vector3::x(),
        }
    }

    pub fn up(self) -> Vector3<f32> {
        match self {
            // Straight down: y can't be up
            CameraPreset::Top => -Vector3::z(),
            CameraPreset::Iso | CameraPreset::Front | CameraPreset::Profile => Vector3::y(),
        }
    }

    pub fn target(self) -> Point3<f32> {
        Point3::origin()
    }

    pub fn eye(self, distance: f32) -> Point3<f32> {
        self.target() + self.direction() * distance
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(self, distance: f32) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.eye(distance), &self.target(), &self.up())
    }
}

/// Projection mode for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectionMode {
    #[default]
    Orthographic,
    Perspective,
}

/// Projection settings for the viewport
#[derive(Debug, Clone, Copy)]
pub struct Projection {
    pub mode: ProjectionMode,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    /// Half of the visible height in orthographic mode
    pub extent: f32,
}

impl Projection {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            mode: ProjectionMode::Orthographic,
            fov: std::f32::consts::PI / 4.0, // 45 degrees
            aspect: width as f32 / height.max(1) as f32,
            near: 0.1,
            far: 200.0,
            extent: 10.0,
        }
    }

    pub fn with_mode(mut self, mode: ProjectionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Create the projection matrix
    pub fn matrix(&self) -> Matrix4<f32> {
        match self.mode {
            ProjectionMode::Perspective => {
                Matrix4::new_perspective(self.aspect, self.fov, self.near, self.far)
            }
            ProjectionMode::Orthographic => {
                let half_h = self.extent;
                let half_w = half_h * self.aspect;
                // The eye may sit inside the scene, so the slab extends behind it
                Matrix4::new_orthographic(-half_w, half_w, -half_h, half_h, -self.far, self.far)
            }
        }
    }

    /// Project a point in model space to screen space.
    ///
    /// Returns `(x, y, depth)` with depth in NDC. Points outside the screen
    /// rectangle are still returned so callers can clip whole triangles;
    /// `None` means the point is behind the eye or outside the depth range.
    pub fn project_to_screen(
        &self,
        point: &Point3<f32>,
        model_view: &Matrix4<f32>,
        width: u32,
        height: u32,
    ) -> Option<(f32, f32, f32)> {
        Self::project_with(&(self.matrix() * model_view), point, width, height)
    }

    /// Same as `project_to_screen` with the model-view-projection product
    /// computed once by the caller
    pub fn project_with(
        mvp: &Matrix4<f32>,
        point: &Point3<f32>,
        width: u32,
        height: u32,
    ) -> Option<(f32, f32, f32)> {
        let clip = mvp * point.to_homogeneous();

        // Prevent division by near-zero w
        if clip.w < 1e-6 {
            return None;
        }

        let ndc = clip.xyz() / clip.w;
        if !(-1.0..=1.0).contains(&ndc.z) {
            return None;
        }

        let screen_x = (ndc.x + 1.0) * 0.5 * width as f32;
        let screen_y = (1.0 - ndc.y) * 0.5 * height as f32;

        Some((screen_x, screen_y, ndc.z))
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self::new(800, 600)
    }
}
