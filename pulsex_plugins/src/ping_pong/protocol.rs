//! Ping-pong 消息协议
//!
//! 词汇表只有 PING 和 PONG 两种消息。入站负载采取宽松的结构化判定：
//! 凡是带 `type` 字段的对象都算结构上的消息，无法识别的标签走正常的
//! 未知命令分支而不是异常路径。

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 消息类型标签
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MessageType {
    /// 出站探测
    Ping,
    /// 存活应答
    Pong,
}

/// Ping-pong 消息
///
/// 除类型标签外不携带任何负载，存活检测不需要更多信息。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// 消息类型
    #[serde(rename = "type")]
    pub kind: MessageType,
}

impl Message {
    /// PING 消息
    pub fn ping() -> Self {
        Self {
            kind: MessageType::Ping,
        }
    }

    /// PONG 消息
    pub fn pong() -> Self {
        Self {
            kind: MessageType::Pong,
        }
    }
}

/// 入站负载的解码结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoded {
    /// PING 消息
    Ping,
    /// PONG 消息
    Pong,
    /// 结构上是消息但标签无法识别
    Unrecognized,
    /// 根本不是消息（缺少 `type` 字段）
    NotAMessage,
}

/// 解码入站负载
///
/// 字符串标签 `"PING"`/`"PONG"` 是标准形式；数字标签 `0`/`1` 是
/// 兼容的枚举编码，同样被接受。
pub fn decode(payload: &Value) -> Decoded {
    let Some(tag) = payload.get("type") else {
        return Decoded::NotAMessage;
    };

    match tag {
        Value::String(s) if s == "PING" => Decoded::Ping,
        Value::String(s) if s == "PONG" => Decoded::Pong,
        Value::Number(n) if n.as_u64() == Some(0) => Decoded::Ping,
        Value::Number(n) if n.as_u64() == Some(1) => Decoded::Pong,
        _ => Decoded::Unrecognized,
    }
}
