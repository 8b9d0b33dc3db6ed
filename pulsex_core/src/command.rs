//! 命令分发与设置应用的数据类型
//!
//! 外部通过 [`Command`] 向发射器下发命令，发射器以 [`ExecutionResult`]
//! 作为结构化结果返回；[`SettingsUpdate`] 承载身份字段和轮询间隔的变更。

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 下发给发射器的命令
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Command {
    /// 调用方提供的动作 id，原样回传到结果中
    pub action_id: String,
    /// 命令负载
    pub payload: Value,
}

impl Command {
    /// 创建新命令
    pub fn new(action_id: impl Into<String>, payload: Value) -> Self {
        Self {
            action_id: action_id.into(),
            payload,
        }
    }
}

/// 命令执行结果
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExecutionResult {
    /// 对应命令的动作 id
    pub action_id: String,
    /// 是否执行成功
    pub success: bool,
    /// 失败原因（成功时为空）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
}

impl ExecutionResult {
    /// 成功结果
    pub fn ok(action_id: impl Into<String>) -> Self {
        Self {
            action_id: action_id.into(),
            success: true,
            failure_reason: None,
        }
    }

    /// 失败结果
    pub fn fail(action_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            action_id: action_id.into(),
            success: false,
            failure_reason: Some(reason.into()),
        }
    }
}

/// 发射器设置变更
///
/// 所有字段均为可选，仅应用提供的部分。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsUpdate {
    /// 调用方提供的动作 id
    pub action_id: String,
    /// 新的轮询间隔（毫秒）
    #[serde(default)]
    pub interval_ms: Option<u64>,
    /// 新的发射器 id
    #[serde(default)]
    pub id: Option<String>,
    /// 新的名称
    #[serde(default)]
    pub name: Option<String>,
    /// 新的描述
    #[serde(default)]
    pub description: Option<String>,
    /// 发射器自定义的附加设置
    #[serde(default)]
    pub additional: Option<Value>,
}

impl SettingsUpdate {
    /// 创建空的设置变更
    pub fn new(action_id: impl Into<String>) -> Self {
        Self {
            action_id: action_id.into(),
            ..Default::default()
        }
    }

    /// 设置轮询间隔
    pub fn with_interval_ms(mut self, interval_ms: u64) -> Self {
        self.interval_ms = Some(interval_ms);
        self
    }

    /// 设置身份字段
    pub fn with_identity(
        mut self,
        id: Option<String>,
        name: Option<String>,
        description: Option<String>,
    ) -> Self {
        self.id = id;
        self.name = name;
        self.description = description;
        self
    }
}
