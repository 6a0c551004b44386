//! External API integrations

pub mod gibs;

pub use gibs::GibsClient;
