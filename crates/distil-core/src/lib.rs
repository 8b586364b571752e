pub mod config;
pub mod error;
pub mod telegram;
pub mod timestamp;
pub mod transform;

pub use config::{ConfigError, Settings};
pub use error::{Error, TransformError};
pub use telegram::{NamePolicy, TelegramChatTransformer};
pub use transform::Transform;
