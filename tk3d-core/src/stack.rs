/// Save/restore stack for the accumulated model-view transform
use nalgebra::{Matrix4, Vector3};

use crate::error::SceneError;
use crate::transform::{LocalTransform, Transform};

/// Current transform plus a LIFO of saved ones.
///
/// `compose` right-multiplies, so a transform composed later acts on the
/// child's local frame before everything already accumulated.
#[derive(Debug, Clone)]
pub struct TransformStack {
    current: Matrix4<f32>,
    saved: Vec<Matrix4<f32>>,
    max_depth: usize,
}

impl TransformStack {
    pub fn new() -> Self {
        Self {
            current: Matrix4::identity(),
            saved: Vec::new(),
            max_depth: 0,
        }
    }

    /// Back to identity with nothing saved
    pub fn reset(&mut self) {
        self.current = Matrix4::identity();
        self.saved.clear();
        self.max_depth = 0;
    }

    pub fn push(&mut self) {
        self.saved.push(self.current);
        self.max_depth = self.max_depth.max(self.saved.len());
    }

    pub fn pop(&mut self) -> Result<(), SceneError> {
        self.current = self.saved.pop().ok_or(SceneError::StackUnderflow)?;
        Ok(())
    }

    /// Run `f` between a push and its pop.
    ///
    /// The pop happens even when `f` fails, so an error inside a subtree
    /// never leaks that subtree's transform into its siblings. An error from
    /// `f` takes precedence over a failed pop.
    pub fn with_pushed<T, F>(&mut self, f: F) -> Result<T, SceneError>
    where
        F: FnOnce(&mut Self) -> Result<T, SceneError>,
    {
        self.push();
        let result = f(self);
        let popped = self.pop();
        let value = result?;
        popped?;
        Ok(value)
    }

    pub fn compose(&mut self, local: &Matrix4<f32>) {
        self.current = self.current * local;
    }

    pub fn compose_chain(&mut self, chain: &LocalTransform) {
        for op in chain.ops() {
            self.compose(&op.matrix());
        }
    }

    /// Replace the current transform, e.g. with the camera view
    pub fn load(&mut self, transform: Matrix4<f32>) {
        self.current = transform;
    }

    pub fn current(&self) -> &Matrix4<f32> {
        &self.current
    }

    /// Number of saved transforms
    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    /// Deepest nesting seen since the last reset
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Start a new max-depth measurement from the current depth
    pub fn reset_max_depth(&mut self) {
        self.max_depth = self.saved.len();
    }

    pub fn translate(&mut self, t: Vector3<f32>) {
        self.compose(&Transform::translation_matrix(t.x, t.y, t.z));
    }

    pub fn scale(&mut self, s: Vector3<f32>) {
        self.compose(&Transform::scale_matrix(s.x, s.y, s.z));
    }

    pub fn rotate_x(&mut self, deg: f32) {
        self.compose(&Transform::rotation_x(deg));
    }

    pub fn rotate_y(&mut self, deg: f32) {
        self.compose(&Transform::rotation_y(deg));
    }

    pub fn rotate_z(&mut self, deg: f32) {
        self.compose(&Transform::rotation_z(deg));
    }
}

impl Default for TransformStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    #[test]
    fn test_starts_at_identity() {
        let stack = TransformStack::new();
        assert_eq!(stack.depth(), 0);
        assert!((stack.current() - Matrix4::identity()).norm() < 1e-6);
    }

    #[test]
    fn test_pop_restores_saved() {
        let mut stack = TransformStack::new();
        stack.translate(Vector3::new(1.0, 2.0, 3.0));
        let before = *stack.current();

        stack.push();
        stack.rotate_y(45.0);
        stack.scale(Vector3::new(3.0, 3.0, 3.0));
        assert_eq!(stack.depth(), 1);
        stack.pop().unwrap();

        assert_eq!(stack.depth(), 0);
        assert_eq!(*stack.current(), before);
    }

    #[test]
    fn test_pop_on_empty_is_underflow() {
        let mut stack = TransformStack::new();
        assert_eq!(stack.pop(), Err(SceneError::StackUnderflow));

        stack.push();
        stack.pop().unwrap();
        assert_eq!(stack.pop(), Err(SceneError::StackUnderflow));
    }

    #[test]
    fn test_scale_then_translate() {
        let mut stack = TransformStack::new();
        stack.compose(&Transform::scale_matrix(2.0, 1.0, 2.0));
        stack.compose(&Transform::translation_matrix(0.0, 3.0, 0.0));

        let world = stack.current().transform_point(&Point3::new(1.0, 1.0, 1.0));
        assert_relative_eq!(world, Point3::new(2.0, 4.0, 2.0), epsilon = 1e-6);
    }

    #[test]
    fn test_load_replaces_current() {
        let mut stack = TransformStack::new();
        stack.rotate_x(30.0);
        let view = Transform::translation_matrix(0.0, 0.0, -10.0);
        stack.load(view);
        assert_eq!(*stack.current(), view);
    }

    #[test]
    fn test_with_pushed_is_balanced() {
        let mut stack = TransformStack::new();
        let before = *stack.current();
        let depth_inside = stack
            .with_pushed(|s| {
                s.translate(Vector3::new(5.0, 0.0, 0.0));
                s.with_pushed(|s| Ok(s.depth()))
            })
            .unwrap();

        assert_eq!(depth_inside, 2);
        assert_eq!(stack.depth(), 0);
        assert_eq!(stack.max_depth(), 2);
        assert_eq!(*stack.current(), before);
    }

    #[test]
    fn test_with_pushed_pops_on_error() {
        let mut stack = TransformStack::new();
        let result: Result<(), _> = stack.with_pushed(|s| {
            s.translate(Vector3::new(1.0, 0.0, 0.0));
            Err(SceneError::UnbalancedFrame { depth: 9 })
        });
        assert_eq!(result, Err(SceneError::UnbalancedFrame { depth: 9 }));
        assert_eq!(stack.depth(), 0);
        assert!((stack.current() - Matrix4::identity()).norm() < 1e-6);
    }

    #[test]
    fn test_closure_error_wins_over_underflow() {
        let mut stack = TransformStack::new();
        let result: Result<(), _> = stack.with_pushed(|s| {
            s.pop()?;
            Err(SceneError::UnbalancedFrame { depth: 7 })
        });
        assert_eq!(result, Err(SceneError::UnbalancedFrame { depth: 7 }));
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn test_extra_pop_inside_is_reported() {
        let mut stack = TransformStack::new();
        let result = stack.with_pushed(|s| s.pop());
        assert_eq!(result, Err(SceneError::StackUnderflow));
    }

    #[test]
    fn test_reset_restores_identity() {
        let mut stack = TransformStack::new();
        stack.translate(Vector3::new(1.0, 2.0, 3.0));
        stack.push();
        stack.push();
        stack.rotate_y(30.0);
        assert_eq!(stack.max_depth(), 2);

        stack.reset();
        assert_eq!(*stack.current(), Matrix4::identity());
        assert_eq!(stack.depth(), 0);
        assert_eq!(stack.max_depth(), 0);
        assert_eq!(stack.pop(), Err(SceneError::StackUnderflow));
    }

    #[test]
    fn test_compose_chain_matches_matrix() {
        let chain = LocalTransform::new()
            .translate(1.0, 2.0, 3.0)
            .rotate_z(20.0)
            .scale(0.5, 2.0, 1.0);
        let mut stack = TransformStack::new();
        stack.compose_chain(&chain);
        assert_relative_eq!(*stack.current(), chain.matrix(), epsilon = 1e-6);
    }
}
