pub mod auth;
pub mod navigation;

// Re-export auth module for easier access
pub use auth::*;
