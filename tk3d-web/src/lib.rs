/// TK3D Web - WASM bindings for the tank scene
///
/// The scene is simulated and composed here; the page rasterizes the
/// resulting draw list with WebGL. Each tick yields `FLOATS_PER_DRAW`
/// floats per draw call: mesh kind index, r, g, b, then the 16 entries of
/// the model-view matrix in column-major order.
use tk3d_core::{
    command_for_key, DrawList, DrawMode, FrameDriver, MeshKind, Projection, ProjectionMode,
    Tuning,
};
use wasm_bindgen::prelude::*;

pub const FLOATS_PER_DRAW: usize = 20;

#[wasm_bindgen]
pub struct WebScene {
    driver: FrameDriver,
    draws: DrawList,
    perspective: bool,
}

#[wasm_bindgen]
impl WebScene {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebScene {
        WebScene {
            driver: FrameDriver::new(Tuning::default()),
            draws: DrawList::new(),
            perspective: false,
        }
    }

    /// Apply the command bound to a DOM `KeyboardEvent.key`. Returns true
    /// when the scene changed.
    pub fn key_down(&mut self, key: &str) -> bool {
        match command_for_key(key) {
            Some(command) => self.driver.apply(command),
            None => false,
        }
    }

    /// Advance one fixed step and rebuild the draw list. Returns the number
    /// of draw calls.
    pub fn tick(&mut self) -> Result<u32, JsValue> {
        self.draws.clear();
        let stats = self
            .driver
            .tick(&mut self.draws)
            .map_err(|err| JsValue::from_str(&err.to_string()))?;
        Ok(stats.draw_calls as u32)
    }

    /// Draw list of the last tick, flattened
    pub fn draw_data(&self) -> Vec<f32> {
        let mut data = Vec::with_capacity(self.draws.len() * FLOATS_PER_DRAW);
        for call in &self.draws.calls {
            data.push(call.kind.index() as f32);
            data.extend_from_slice(&[call.color.r, call.color.g, call.color.b]);
            data.extend_from_slice(call.transform.as_slice());
        }
        data
    }

    /// Projection matrix, column-major, for a canvas of the given aspect
    pub fn projection(&self, aspect: f32) -> Vec<f32> {
        let mode = if self.perspective {
            ProjectionMode::Perspective
        } else {
            ProjectionMode::Orthographic
        };
        let mut projection = Projection::default().with_mode(mode);
        projection.aspect = aspect.max(1e-3);
        projection.extent = self.driver.state().zoom;
        projection.matrix().as_slice().to_vec()
    }

    pub fn set_perspective(&mut self, perspective: bool) {
        self.perspective = perspective;
    }

    pub fn wireframe(&self) -> bool {
        self.driver.state().draw_mode == DrawMode::Wireframe
    }

    pub fn time(&self) -> f32 {
        self.driver.state().time
    }

    pub fn live_projectiles(&self) -> u32 {
        self.driver.state().projectiles.len() as u32
    }

    /// Number of distinct meshes the page must upload, indexed as in
    /// `draw_data`
    pub fn mesh_kinds() -> u32 {
        MeshKind::ALL.len() as u32
    }
}

impl Default for WebScene {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    web_sys::console::log_1(&JsValue::from_str("tk3d-web loaded"));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_fills_draw_data() {
        let mut scene = WebScene::new();
        let count = scene.tick().unwrap();
        assert!(count > 0);
        assert_eq!(scene.draw_data().len(), count as usize * FLOATS_PER_DRAW);
    }

    #[test]
    fn test_keys_drive_the_scene() {
        let mut scene = WebScene::new();
        assert!(scene.wireframe());
        assert!(scene.key_down("S"));
        assert!(!scene.wireframe());
        assert!(!scene.key_down("Enter"));

        assert!(scene.key_down(" "));
        scene.tick().unwrap();
        assert_eq!(scene.live_projectiles(), 1);
    }

    #[test]
    fn test_projection_is_column_major() {
        let scene = WebScene::new();
        let matrix = scene.projection(1.0);
        assert_eq!(matrix.len(), 16);
        // Orthographic: no perspective divide
        assert_eq!(matrix[15], 1.0);
        assert_eq!(matrix[11], 0.0);
    }
}
