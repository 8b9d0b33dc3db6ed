//! Simplified host builder for common use cases
//!
//! Provides a high-level API for wiring the factory registry and building
//! emitters with minimal boilerplate.

use crate::Result;
use pulsex_config::RuntimeConfig;
use pulsex_core::emitter::{DataEmitter, EmitterDescription};
use pulsex_core::registry::{EmitterFactory, EmitterRegistry};
use pulsex_core::state::FormatSettings;
use std::sync::Arc;

/// Simplified host builder
///
/// Collects the runtime configuration and emitter factories, then builds an
/// [`EmitterHost`] with a validated configuration.
///
/// # Example
///
/// ```rust,no_run,ignore
/// use pulsex::Host;
/// use pulsex_plugins::prelude::*;
/// use std::sync::Arc;
///
/// let host = Host::new()
///     .register_factory(PingPongEmitter::TYPE, Arc::new(PingPongEmitterFactory))
///     .build()?;
/// ```
pub struct HostBuilder {
    /// Runtime configuration
    config: RuntimeConfig,
    /// Factories to register, keyed by type tag
    factories: Vec<(String, Arc<dyn EmitterFactory>)>,
}

impl HostBuilder {
    /// Create a new host builder with default configuration
    pub fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            factories: Vec::new(),
        }
    }

    /// Set custom runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Queue an emitter factory for registration under a type tag
    pub fn register_factory(
        mut self,
        type_tag: impl Into<String>,
        factory: Arc<dyn EmitterFactory>,
    ) -> Self {
        self.factories.push((type_tag.into(), factory));
        self
    }

    /// Build the host
    ///
    /// Validates the configuration and registers all queued factories;
    /// duplicate type tags are rejected.
    pub fn build(self) -> Result<EmitterHost> {
        self.config.validate()?;

        let mut registry = EmitterRegistry::new();
        for (type_tag, factory) in self.factories {
            registry.register(type_tag, factory)?;
        }

        Ok(EmitterHost {
            config: self.config,
            registry,
        })
    }
}

impl Default for HostBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Type alias for convenience
pub type Host = HostBuilder;

/// Emitter host
///
/// Owns the validated configuration and the factory registry; builds and
/// recreates emitter instances on demand.
pub struct EmitterHost {
    config: RuntimeConfig,
    registry: EmitterRegistry,
}

impl EmitterHost {
    /// Runtime configuration
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Factory registry
    pub fn registry(&self) -> &EmitterRegistry {
        &self.registry
    }

    /// Build an emitter from a description
    pub async fn build_emitter(
        &self,
        description: EmitterDescription,
    ) -> Result<Box<dyn DataEmitter>> {
        Ok(self.registry.build(description).await?)
    }

    /// Recreate an emitter from a serialized state string
    pub async fn recreate_emitter(
        &self,
        state: &str,
        settings: &FormatSettings,
    ) -> Result<Box<dyn DataEmitter>> {
        Ok(self.registry.recreate(state, settings).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let builder = HostBuilder::new();
        assert_eq!(builder.config.default_interval_ms, 1000);
        assert!(builder.factories.is_empty());
    }

    #[test]
    fn test_build_with_default_config() {
        let host = HostBuilder::new().build().unwrap();
        assert_eq!(host.registry().count(), 0);
    }

    #[test]
    fn test_build_rejects_invalid_config() {
        let config = RuntimeConfig {
            default_interval_ms: 0,
            ..Default::default()
        };
        let result = HostBuilder::new().config(config).build();
        assert!(result.is_err());
    }

    #[cfg(feature = "plugins")]
    mod with_plugins {
        use super::*;
        use pulsex_plugins::prelude::*;

        #[test]
        fn test_register_factory() {
            let host = Host::new()
                .register_factory(PingPongEmitter::TYPE, Arc::new(PingPongEmitterFactory))
                .build()
                .unwrap();
            assert_eq!(host.registry().count(), 1);
        }

        #[test]
        fn test_duplicate_factory_rejected() {
            let result = Host::new()
                .register_factory(PingPongEmitter::TYPE, Arc::new(PingPongEmitterFactory))
                .register_factory(PingPongEmitter::TYPE, Arc::new(PingPongEmitterFactory))
                .build();
            assert!(result.is_err());
        }
    }
}
