// Shared Kernel - Domain Driven Design
// Following Clean Architecture + Hexagonal Architecture patterns

pub mod config; // Environment-driven configuration
pub mod errors; // Shared error types
pub mod infrastructure; // Shared infrastructure (HTTP plumbing)
pub mod utils; // Shared utilities

// Re-exports for convenience
pub use config::{AppConfig, AppwriteConfig, TmdbConfig};
pub use errors::{AppError, AppResult};
