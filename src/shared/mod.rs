// Shared kernel used by every bounded context

pub mod application; // Shared application layer patterns (pagination)
pub mod errors; // Shared error types
pub mod infrastructure; // Configuration and database access
pub mod utils; // Logging, rate limiting, validation

// Re-exports for convenience
pub use infrastructure::config::AppConfig;
pub use infrastructure::database::Database;
