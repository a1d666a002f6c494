pub mod config;
pub mod error;
pub mod types;
pub mod upstream;

pub use config::ShreeConfig;
pub use error::{Result, ShreeError};
pub use types::*;
pub use upstream::{Content, GenerateContentRequest, Part};
