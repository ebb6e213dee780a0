//! External log rotation

use std::io;
use std::path::Path;

use crate::types::RotationHint;

/// Rotation collaborator
///
/// Writers never rotate files themselves. When both a rotation hint and a
/// rotator are configured, the writer registers its path with the rotator
/// once, while opening.
pub trait Rotator: Send + Sync {
    fn register(&self, path: &Path, hint: &RotationHint) -> io::Result<()>;
}
