pub mod raw;

pub use raw::{RawChat, RawMessage, RawReaction, RawTextEntity, RawTextRun};

use thiserror::Error;

/// The raw document does not match the expected export shape.
/// Carries enough of the serde path to locate the offending field.
#[derive(Debug, Error)]
#[error("invalid chat export: {0}")]
pub struct ValidationError(pub String);
