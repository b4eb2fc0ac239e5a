/// Errors raised while traversing the scene
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SceneError {
    /// `pop` was called with no matching `push`
    #[error("transform stack underflow: pop without matching push")]
    StackUnderflow,

    /// A frame finished with saved transforms still on the stack
    #[error("unbalanced frame: {depth} transform(s) left on the stack")]
    UnbalancedFrame { depth: usize },
}
