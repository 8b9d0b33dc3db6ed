//! 数据发射器契约
//!
//! [`DataEmitter`] 是所有发射器实现的统一接口：事件订阅、命令分发、
//! 设置应用、状态探测和状态序列化。

use crate::command::{Command, ExecutionResult, SettingsUpdate};
use crate::error::Result;
use crate::event::{DataEvent, DataSubscription, epoch_ms};
use crate::state::FormatSettings;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 发射器描述
///
/// 工厂据此构建发射器实例；`properties` 承载各发射器类型自定义的配置。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmitterDescription {
    /// 发射器类型标签
    pub type_tag: String,
    /// 发射器 id
    pub id: String,
    /// 名称
    pub name: String,
    /// 描述
    pub description: String,
    /// 类型自定义属性
    #[serde(default)]
    pub properties: Option<Value>,
}

/// 发射器状态探测结果
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Status {
    /// 自检故障标志（true 表示已故障）
    pub bit: bool,
    /// 轮询是否在运行
    pub connected: bool,
    /// 探测时间戳（Unix 毫秒）
    pub timestamp_ms: u64,
}

impl Status {
    /// 创建当前时刻的状态记录
    pub fn now(bit: bool, connected: bool) -> Self {
        Self {
            bit,
            connected,
            timestamp_ms: epoch_ms(),
        }
    }
}

/// 数据发射器统一接口
///
/// 命令处理中的所有失败都转换为 [`ExecutionResult`]，不向外抛出。
#[async_trait]
pub trait DataEmitter: Send + Sync {
    /// 发射器 id 快照
    fn id(&self) -> String;

    /// 名称快照
    fn name(&self) -> String;

    /// 描述快照
    fn description(&self) -> String;

    /// 稳定的类型标签，注册表据此查找工厂
    fn type_tag(&self) -> &'static str;

    /// 订阅该发射器的数据事件
    fn on_data(&self) -> DataSubscription;

    /// 处理一条入站命令
    async fn send_command(&self, command: Command) -> ExecutionResult;

    /// 应用设置变更（身份字段、轮询间隔）
    async fn apply_settings(&self, settings: SettingsUpdate) -> ExecutionResult;

    /// 探测当前状态
    async fn probe_status(&self) -> Status;

    /// 最近一次发射的数据事件
    async fn probe_current_data(&self) -> Option<DataEvent>;

    /// 序列化发射器状态为不透明字符串
    async fn serialize_state(&self, settings: &FormatSettings) -> Result<String>;

    /// 释放后台资源（定时器等）；可重复调用
    async fn dispose(&self);
}
