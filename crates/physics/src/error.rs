use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhysicsError {
    #[error("unknown rigid body {0:?}")]
    UnknownBody(crate::BodyHandle),
    #[error("unknown joint {0:?}")]
    UnknownJoint(crate::JointHandle),
}
