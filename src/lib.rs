pub mod api;
pub mod config;
pub mod error;
pub mod market;
pub mod swap;
pub mod tokens;
pub mod upstream;
pub mod wallet;

// Re-export common modules
pub use api::router;
pub use config::Config;
pub use error::AppError;
