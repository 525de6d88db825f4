pub mod app_config;
pub mod config;
pub mod mime;
pub mod rows;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env, ConfigError};
pub use mime::{filename_for_url, mime_type_for_url};
pub use rows::{read_rows, read_rows_from_reader, RowError, VariantImageRow};
