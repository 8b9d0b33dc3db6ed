//! 发射器工厂注册表
//!
//! 按类型标签注册工厂并据此构建/恢复发射器实例。注册表是显式传递的
//! 普通值，不是进程级单例。

use crate::emitter::{DataEmitter, EmitterDescription};
use crate::error::{PulseXError, Result};
use crate::state::{self, FormatSettings};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

/// 发射器工厂 trait
#[async_trait]
pub trait EmitterFactory: Send + Sync {
    /// 根据描述构建发射器实例
    async fn build(&self, description: EmitterDescription) -> Result<Box<dyn DataEmitter>>;

    /// 从序列化状态恢复发射器实例
    ///
    /// 默认实现直接委托给注册表的通用恢复路径；工厂存在的意义是让
    /// 类型标签在注册表中可查。
    async fn recreate(
        &self,
        state: &str,
        settings: &FormatSettings,
        registry: &EmitterRegistry,
    ) -> Result<Box<dyn DataEmitter>> {
        registry.recreate(state, settings).await
    }
}

/// 发射器工厂注册表
pub struct EmitterRegistry {
    /// 类型标签 -> 工厂
    factories: HashMap<String, Arc<dyn EmitterFactory>>,
}

impl EmitterRegistry {
    /// 创建空注册表
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// 注册工厂
    pub fn register(
        &mut self,
        type_tag: impl Into<String>,
        factory: Arc<dyn EmitterFactory>,
    ) -> Result<&mut Self> {
        let tag = type_tag.into();

        // 检查是否已存在
        if self.factories.contains_key(&tag) {
            return Err(PulseXError::registry(format!("工厂已存在: {}", tag)));
        }

        self.factories.insert(tag, factory);
        Ok(self)
    }

    /// 按类型标签查找工厂
    pub fn get(&self, type_tag: &str) -> Option<Arc<dyn EmitterFactory>> {
        self.factories.get(type_tag).cloned()
    }

    /// 已注册的工厂数量
    pub fn count(&self) -> usize {
        self.factories.len()
    }

    /// 根据描述构建发射器
    pub async fn build(&self, description: EmitterDescription) -> Result<Box<dyn DataEmitter>> {
        let factory = self.get(&description.type_tag).ok_or_else(|| {
            PulseXError::registry(format!("未注册的发射器类型: {}", description.type_tag))
        })?;
        factory.build(description).await
    }

    /// 通用恢复路径：解码状态信封，重建描述，再走构建路径
    pub async fn recreate(
        &self,
        state: &str,
        settings: &FormatSettings,
    ) -> Result<Box<dyn DataEmitter>> {
        let envelope = state::open(state, settings)?;
        let description = EmitterDescription {
            type_tag: envelope.type_tag,
            id: envelope.id,
            name: envelope.name,
            description: envelope.description,
            properties: Some(envelope.properties),
        };
        self.build(description).await
    }
}

impl Default for EmitterRegistry {
    fn default() -> Self {
        Self::new()
    }
}
