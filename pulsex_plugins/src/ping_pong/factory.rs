//! Ping-pong 发射器工厂
//!
//! 校验描述中的必需属性并构建发射器；恢复路径直接委托注册表的
//! 通用恢复能力。

use crate::ping_pong::PingPongEmitter;
use async_trait::async_trait;
use pulsex_core::emitter::{DataEmitter, EmitterDescription};
use pulsex_core::error::{PulseXError, Result};
use pulsex_core::registry::EmitterFactory;

/// Ping-pong 发射器工厂
#[derive(Debug, Default)]
pub struct PingPongEmitterFactory;

#[async_trait]
impl EmitterFactory for PingPongEmitterFactory {
    async fn build(&self, description: EmitterDescription) -> Result<Box<dyn DataEmitter>> {
        let properties = description
            .properties
            .as_ref()
            .ok_or_else(|| PulseXError::config("missing required emitter properties"))?;

        let interval_ms = properties
            .get("interval")
            .and_then(|value| value.as_u64())
            .ok_or_else(|| PulseXError::config("missing required interval property"))?;

        if interval_ms == 0 {
            return Err(PulseXError::validation(
                "interval must be greater than 0",
            ));
        }

        Ok(Box::new(PingPongEmitter::new(
            description.id,
            description.name,
            description.description,
            interval_ms,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_description(properties: Option<serde_json::Value>) -> EmitterDescription {
        EmitterDescription {
            type_tag: PingPongEmitter::TYPE.to_string(),
            id: "test".to_string(),
            name: "test-name".to_string(),
            description: "test-desc".to_string(),
            properties,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_build_to_specification() {
        let factory = PingPongEmitterFactory;
        let emitter = factory
            .build(sample_description(Some(json!({"interval": 2500}))))
            .await
            .unwrap();

        assert_eq!(emitter.id(), "test");
        assert_eq!(emitter.name(), "test-name");
        assert_eq!(emitter.description(), "test-desc");
        assert_eq!(emitter.type_tag(), "PING-PONG-EMITTER");

        emitter.dispose().await;
    }

    #[tokio::test]
    async fn test_build_without_properties() {
        let factory = PingPongEmitterFactory;
        let result = factory.build(sample_description(None)).await;
        match result {
            Err(PulseXError::Config(msg)) => {
                assert_eq!(msg, "missing required emitter properties");
            }
            _ => panic!("expected config error"),
        }
    }

    #[tokio::test]
    async fn test_build_without_interval() {
        let factory = PingPongEmitterFactory;
        let result = factory
            .build(sample_description(Some(json!({"other": 1}))))
            .await;
        match result {
            Err(PulseXError::Config(msg)) => {
                assert_eq!(msg, "missing required interval property");
            }
            _ => panic!("expected config error"),
        }
    }

    #[tokio::test]
    async fn test_build_with_non_numeric_interval() {
        let factory = PingPongEmitterFactory;
        let result = factory
            .build(sample_description(Some(json!({"interval": "fast"}))))
            .await;
        assert!(matches!(result, Err(PulseXError::Config(_))));
    }

    #[tokio::test]
    async fn test_build_with_zero_interval() {
        let factory = PingPongEmitterFactory;
        let result = factory
            .build(sample_description(Some(json!({"interval": 0}))))
            .await;
        assert!(matches!(result, Err(PulseXError::Validation(_))));
    }
}
