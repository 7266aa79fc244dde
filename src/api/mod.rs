pub mod artifact;
pub mod format;

pub use artifact::{handle_artifact, handle_preview};
pub use format::handle_format;
