/// One simulate-and-draw tick of the scene
use nalgebra::Matrix4;
use tracing::{debug, warn};

use crate::controls::Command;
use crate::draw::{CountingDrawer, MeshDrawer};
use crate::error::SceneError;
use crate::projectile::Projectile;
use crate::scene::{traverse, Node};
use crate::stack::TransformStack;
use crate::state::SceneState;
use crate::tank::{floor_node, muzzle_transform, tank_node};
use crate::tuning::Tuning;

/// What a tick did
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameStats {
    /// Simulated time after the tick
    pub time: f32,
    pub draw_calls: usize,
    pub fired: u32,
    pub landed: usize,
    pub live_projectiles: usize,
    pub max_stack_depth: usize,
}

/// Owns the scene state and the transform stack, and runs ticks.
///
/// Floor, tank and projectiles are sibling subtrees of the camera frame,
/// each drawn inside its own push/pop pair.
pub struct FrameDriver {
    tuning: Tuning,
    state: SceneState,
    stack: TransformStack,
    floor: Node,
}

impl FrameDriver {
    pub fn new(tuning: Tuning) -> Self {
        Self {
            state: SceneState::new(&tuning),
            stack: TransformStack::new(),
            floor: floor_node(&tuning.floor),
            tuning,
        }
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn state(&self) -> &SceneState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut SceneState {
        &mut self.state
    }

    pub fn stack(&self) -> &TransformStack {
        &self.stack
    }

    pub fn apply(&mut self, command: Command) -> bool {
        self.state.apply(command, &self.tuning)
    }

    /// Camera transform for the selected preset and zoom
    pub fn view_matrix(&self) -> Matrix4<f32> {
        self.state.camera.view_matrix(self.state.zoom)
    }

    /// World transform of the cannon tip at the current pose
    pub fn muzzle(&self) -> Option<Matrix4<f32>> {
        muzzle_transform(&self.state.tank, &self.tuning.tank)
    }

    pub fn tick<D: MeshDrawer + ?Sized>(&mut self, drawer: &mut D) -> Result<FrameStats, SceneError> {
        let dt = self.tuning.sim.dt;

        let mut landed = 0;
        if self.state.animation {
            self.state.time += dt;
            landed = self.state.projectiles.step(dt);
        }

        let fired = std::mem::take(&mut self.state.pending_shots);
        if fired > 0 {
            match self.muzzle() {
                Some(muzzle) => {
                    for _ in 0..fired {
                        let shot = Projectile::from_muzzle(&muzzle, self.tuning.tank.muzzle_speed);
                        self.state.projectiles.spawn(shot);
                    }
                }
                None => warn!(fired, "tank has no muzzle frame, shots dropped"),
            }
        }

        let tank = tank_node(&self.state.tank, &self.tuning.tank);
        let shells = Node::ProjectileSet {
            diameter: self.tuning.tank.projectile_diameter,
            color: self.tuning.tank.projectile_color,
        };

        let depth = self.stack.depth();
        self.stack.reset_max_depth();
        self.stack.load(self.view_matrix());

        let mut counter = CountingDrawer {
            inner: drawer,
            count: 0,
        };
        let live = self.state.projectiles.as_slice();
        traverse(&self.floor, &mut self.stack, &mut counter, live)?;
        traverse(&tank, &mut self.stack, &mut counter, live)?;
        traverse(&shells, &mut self.stack, &mut counter, live)?;

        if self.stack.depth() != depth {
            warn!(depth = self.stack.depth(), "frame left the transform stack unbalanced");
            return Err(SceneError::UnbalancedFrame {
                depth: self.stack.depth(),
            });
        }

        let stats = FrameStats {
            time: self.state.time,
            draw_calls: counter.count,
            fired,
            landed,
            live_projectiles: self.state.projectiles.len(),
            max_stack_depth: self.stack.max_depth() - depth,
        };
        if fired > 0 || landed > 0 {
            debug!(?stats, "tick");
        }
        Ok(stats)
    }
}

impl Default for FrameDriver {
    fn default() -> Self {
        Self::new(Tuning::default())
    }
}
