//! 发射器共享运行时
//!
//! 每个发射器实例独占一个 [`EmitterRuntime`]：身份字段、数据事件总线
//! 和轮询连接标志。具体发射器在它之上实现自己的语义。

use pulsex_config::RuntimeConfig;
use pulsex_core::command::SettingsUpdate;
use pulsex_core::emitter::Status;
use pulsex_core::event::{DataEvent, DataSubscription, EventBus};
use serde_json::Value;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

/// 发射器身份字段
#[derive(Debug, Clone, PartialEq)]
pub struct EmitterIdentity {
    /// 发射器 id
    pub id: String,
    /// 名称
    pub name: String,
    /// 描述
    pub description: String,
}

impl EmitterIdentity {
    /// 创建身份记录
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
        }
    }
}

/// 发射器共享运行时
pub struct EmitterRuntime {
    /// 身份字段（可通过设置变更重命名）
    identity: Mutex<EmitterIdentity>,
    /// 数据事件总线
    bus: EventBus,
    /// 轮询是否在运行
    connected: AtomicBool,
}

impl EmitterRuntime {
    /// 创建运行时
    pub fn new(identity: EmitterIdentity, event_capacity: usize) -> Self {
        Self {
            identity: Mutex::new(identity),
            bus: EventBus::new(event_capacity),
            connected: AtomicBool::new(false),
        }
    }

    /// 按运行时配置创建
    pub fn with_config(identity: EmitterIdentity, config: &RuntimeConfig) -> Self {
        Self::new(identity, config.event_capacity)
    }

    /// 发射器 id 快照
    pub fn id(&self) -> String {
        self.identity
            .lock()
            .map(|identity| identity.id.clone())
            .unwrap_or_default()
    }

    /// 名称快照
    pub fn name(&self) -> String {
        self.identity
            .lock()
            .map(|identity| identity.name.clone())
            .unwrap_or_default()
    }

    /// 描述快照
    pub fn description(&self) -> String {
        self.identity
            .lock()
            .map(|identity| identity.description.clone())
            .unwrap_or_default()
    }

    /// 完整身份快照
    pub fn identity(&self) -> EmitterIdentity {
        self.identity
            .lock()
            .map(|identity| identity.clone())
            .unwrap_or_else(|_| EmitterIdentity::new("", "", ""))
    }

    /// 应用设置中的身份字段变更
    pub fn apply_identity(&self, settings: &SettingsUpdate) {
        let Ok(mut identity) = self.identity.lock() else {
            return;
        };
        if let Some(id) = &settings.id {
            identity.id = id.clone();
        }
        if let Some(name) = &settings.name {
            identity.name = name.clone();
        }
        if let Some(description) = &settings.description {
            identity.description = description.clone();
        }
    }

    /// 将负载包装为数据事件并广播给所有监听者
    pub fn notify_listeners(&self, payload: Value) -> usize {
        let event = DataEvent::new(self.id(), payload);
        tracing::debug!(emitter_id = %event.emitter_id, "发射数据事件");
        self.bus.publish(event)
    }

    /// 订阅数据事件
    pub fn on_data(&self) -> DataSubscription {
        self.bus.subscribe()
    }

    /// 最近一次发射的事件
    pub fn current_data(&self) -> Option<DataEvent> {
        self.bus.last_event()
    }

    /// 设置轮询连接标志
    pub fn set_connected(&self, connected: bool) {
        self.connected.store(connected, Ordering::SeqCst);
    }

    /// 轮询是否在运行
    pub fn connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    /// 构建状态探测记录
    pub fn status(&self, bit: bool) -> Status {
        Status::now(bit, self.connected())
    }
}
