//! High-level host API
//!
//! Provides a simplified host building interface for common use cases.

mod builder;

pub use builder::{EmitterHost, Host, HostBuilder};
