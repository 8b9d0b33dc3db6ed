//! Ping-pong 存活监测发射器
//!
//! 按固定间隔向对端发射 PING 探测，对端以 PONG 应答；超过故障阈值
//! 未收到应答时自检位翻转为故障。收到对端的 PING 时本端回以 PONG。

pub mod factory;
pub mod monitor;
pub mod protocol;

use crate::ping_pong::monitor::{LivenessMonitor, MonitorMetadata};
use crate::ping_pong::protocol::{Decoded, Message};
use async_trait::async_trait;
use pulsex_config::RuntimeConfig;
use pulsex_core::command::{Command, ExecutionResult, SettingsUpdate};
use pulsex_core::emitter::{DataEmitter, Status};
use pulsex_core::error::Result;
use pulsex_core::event::{DataEvent, DataSubscription};
use pulsex_core::state::{self, FormatSettings, StateEnvelope};
use pulsex_emitter::polling::{PollScheduler, PollSource};
use pulsex_emitter::runtime::{EmitterIdentity, EmitterRuntime};
use serde_json::{Value, json};
use std::sync::Arc;

/// 未知命令的失败原因
const REASON_UNKNOWN_COMMAND: &str = "unknown command";

/// 内部处理失败的失败原因
const REASON_INTERNAL_ERROR: &str = "internal error";

/// PING 探测源：每个轮询周期产生一条 PING 消息，无副作用
struct PingProbe;

impl PollSource for PingProbe {
    fn poll(&self) -> Result<Value> {
        Ok(json!({"type": "PING"}))
    }
}

/// Ping-pong 存活监测发射器
pub struct PingPongEmitter {
    runtime: Arc<EmitterRuntime>,
    scheduler: PollScheduler,
    monitor: Arc<LivenessMonitor>,
}

impl PingPongEmitter {
    /// 稳定类型标签，注册表和恢复路径据此查找工厂
    pub const TYPE: &'static str = "PING-PONG-EMITTER";

    /// 创建发射器并立即开始探测
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        interval_ms: u64,
    ) -> Self {
        Self::with_config(id, name, description, interval_ms, &RuntimeConfig::default())
    }

    /// 按运行时配置创建
    pub fn with_config(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        interval_ms: u64,
        config: &RuntimeConfig,
    ) -> Self {
        let runtime = Arc::new(EmitterRuntime::with_config(
            EmitterIdentity::new(id, name, description),
            config,
        ));

        let monitor = Arc::new(LivenessMonitor::new(interval_ms));
        monitor.start_checker();

        let scheduler = PollScheduler::new(interval_ms);
        scheduler.start(Arc::new(PingProbe), runtime.clone());

        Self {
            runtime,
            scheduler,
            monitor,
        }
    }

    /// 监视器元数据快照
    pub fn metadata(&self) -> MonitorMetadata {
        self.monitor.metadata()
    }

    /// 当前探测间隔（毫秒）
    pub fn interval_ms(&self) -> u64 {
        self.scheduler.interval_ms()
    }

    /// 处理一条入站负载
    fn handle_payload(&self, action_id: &str, payload: &Value) -> ExecutionResult {
        match protocol::decode(payload) {
            Decoded::Ping => {
                // 对端在探测我们：应答一条 PONG
                match serde_json::to_value(Message::pong()) {
                    Ok(pong) => {
                        self.runtime.notify_listeners(pong);
                        ExecutionResult::ok(action_id)
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "PONG 应答编码失败");
                        ExecutionResult::fail(action_id, REASON_INTERNAL_ERROR)
                    }
                }
            }
            Decoded::Pong => {
                // 对端确认存活
                self.monitor.record_ack();
                ExecutionResult::ok(action_id)
            }
            Decoded::Unrecognized | Decoded::NotAMessage => {
                ExecutionResult::fail(action_id, REASON_UNKNOWN_COMMAND)
            }
        }
    }
}

#[async_trait]
impl DataEmitter for PingPongEmitter {
    fn id(&self) -> String {
        self.runtime.id()
    }

    fn name(&self) -> String {
        self.runtime.name()
    }

    fn description(&self) -> String {
        self.runtime.description()
    }

    fn type_tag(&self) -> &'static str {
        Self::TYPE
    }

    fn on_data(&self) -> DataSubscription {
        self.runtime.on_data()
    }

    async fn send_command(&self, command: Command) -> ExecutionResult {
        self.handle_payload(&command.action_id, &command.payload)
    }

    async fn apply_settings(&self, settings: SettingsUpdate) -> ExecutionResult {
        if let Some(interval_ms) = settings.interval_ms {
            if interval_ms == 0 {
                return ExecutionResult::fail(settings.action_id, "invalid interval");
            }
        }

        self.runtime.apply_identity(&settings);

        if let Some(interval_ms) = settings.interval_ms {
            self.scheduler.set_interval(interval_ms);
            self.monitor.reconfigure(interval_ms);
            tracing::info!(emitter_id = %self.id(), interval_ms, "探测间隔已更新");
        }

        ExecutionResult::ok(settings.action_id)
    }

    async fn probe_status(&self) -> Status {
        self.runtime.status(self.monitor.is_faulted())
    }

    async fn probe_current_data(&self) -> Option<DataEvent> {
        self.runtime.current_data()
    }

    async fn serialize_state(&self, settings: &FormatSettings) -> Result<String> {
        let identity = self.runtime.identity();
        state::seal(
            &StateEnvelope {
                type_tag: Self::TYPE.to_string(),
                id: identity.id,
                name: identity.name,
                description: identity.description,
                properties: json!({"interval": self.scheduler.interval_ms()}),
            },
            settings,
        )
    }

    async fn dispose(&self) {
        self.scheduler.stop();
        self.monitor.dispose();
    }
}
