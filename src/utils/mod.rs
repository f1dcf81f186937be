pub mod config;
pub mod error;
pub mod json;
pub mod logger;
pub mod validator;

pub use config::{load_config, AppConfig};
pub use error::ApiError;
pub use json::JsonBody;
pub use logger::init_logger;
pub use validator::{validate_email, validate_fields, ValidationError};
