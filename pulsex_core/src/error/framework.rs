//! PulseX 框架核心错误类型
//!
//! 定义所有框架级别的错误类型。

use super::context::ErrorContext;
use std::io;
use thiserror::Error;

/// PulseX 框架核心错误类型
#[derive(Error, Debug)]
pub enum PulseXError {
    /// IO 错误
    #[error("IO 错误: {0}")]
    Io(#[from] io::Error),

    /// 配置错误
    #[error("配置错误: {0}")]
    Config(String),

    /// 发射器错误
    #[error("发射器错误: {0}")]
    Emitter(String),

    /// 命令错误
    #[error("命令错误: {0}")]
    Command(String),

    /// 注册表错误
    #[error("注册表错误: {0}")]
    Registry(String),

    /// 序列化/反序列化错误
    #[error("序列化错误: {0}")]
    Serialization(String),

    /// 加密/解密错误
    #[error("加密错误: {0}")]
    Crypto(String),

    /// 验证错误
    #[error("验证失败: {0}")]
    Validation(String),

    /// 超时错误
    #[error("操作超时")]
    Timeout,

    /// 带上下文的错误
    #[error("{0}")]
    WithContext(#[source] Box<PulseXError>, ErrorContext),
}

impl PulseXError {
    /// 获取错误类型
    pub fn kind(&self) -> PulseXErrorKind {
        match self {
            PulseXError::Io(_) => PulseXErrorKind::Io,
            PulseXError::Config(_) => PulseXErrorKind::Config,
            PulseXError::Emitter(_) => PulseXErrorKind::Emitter,
            PulseXError::Command(_) => PulseXErrorKind::Command,
            PulseXError::Registry(_) => PulseXErrorKind::Registry,
            PulseXError::Serialization(_) => PulseXErrorKind::Serialization,
            PulseXError::Crypto(_) => PulseXErrorKind::Crypto,
            PulseXError::Validation(_) => PulseXErrorKind::Validation,
            PulseXError::Timeout => PulseXErrorKind::Timeout,
            PulseXError::WithContext(_, _) => PulseXErrorKind::Other,
        }
    }

    /// 添加上下文信息
    pub fn with_context<C>(self, context: C) -> Self
    where
        C: Into<ErrorContext>,
    {
        PulseXError::WithContext(Box::new(self), context.into())
    }

    /// 创建配置错误
    pub fn config(msg: impl Into<String>) -> Self {
        PulseXError::Config(msg.into())
    }

    /// 创建发射器错误
    pub fn emitter(msg: impl Into<String>) -> Self {
        PulseXError::Emitter(msg.into())
    }

    /// 创建命令错误
    pub fn command(msg: impl Into<String>) -> Self {
        PulseXError::Command(msg.into())
    }

    /// 创建注册表错误
    pub fn registry(msg: impl Into<String>) -> Self {
        PulseXError::Registry(msg.into())
    }

    /// 创建序列化错误
    pub fn serialization(msg: impl Into<String>) -> Self {
        PulseXError::Serialization(msg.into())
    }

    /// 创建加密错误
    pub fn crypto(msg: impl Into<String>) -> Self {
        PulseXError::Crypto(msg.into())
    }

    /// 创建验证错误
    pub fn validation(msg: impl Into<String>) -> Self {
        PulseXError::Validation(msg.into())
    }

    /// 创建超时错误
    pub fn timeout() -> Self {
        PulseXError::Timeout
    }
}

/// 错误类型分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PulseXErrorKind {
    /// IO 错误
    Io,
    /// 配置错误
    Config,
    /// 发射器错误
    Emitter,
    /// 命令错误
    Command,
    /// 注册表错误
    Registry,
    /// 序列化错误
    Serialization,
    /// 加密错误
    Crypto,
    /// 验证错误
    Validation,
    /// 超时错误
    Timeout,
    /// 其他错误
    Other,
}
