use physics::PhysicsError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BridgeError {
    #[error("invalid config: {0}")]
    Config(&'static str),
    #[error("physics world rejected the model: {0}")]
    Physics(#[from] PhysicsError),
}
