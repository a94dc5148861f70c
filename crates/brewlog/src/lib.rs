// Domain-driven module structure for the brewlog service.

// Core infrastructure
pub mod conf;
pub mod error;
pub mod state;

// Domain modules
pub mod brewery;
pub mod logs;
pub mod health;
pub mod runtime;
