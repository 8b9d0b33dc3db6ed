//! # PulseX - 轮询式数据发射与存活监测框架
//!
//! PulseX 是一个面向周期性数据发射和存活监测场景的小型 Rust 框架。
//! 发射器按固定间隔轮询产生数据事件，通过广播通道分发给监听者，
//! 并支持命令分发、设置应用和加密状态序列化/恢复。
//!
//! ## 特性
//!
//! - 基于 Tokio 异步运行时的轮询调度器
//! - 数据事件广播与最近事件缓存
//! - 结构化命令结果（不向外抛异常）
//! - 明文 / AES-256-GCM 两种状态序列化模式
//! - 显式的发射器工厂注册表（无全局单例）
//! - 官方 ping-pong 存活监测发射器插件
//!
//! ## 快速开始
//!
//! ```rust,no_run,ignore
//! use pulsex::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> pulsex::Result<()> {
//!     let host = Host::new()
//!         .register_factory(PingPongEmitter::TYPE, Arc::new(PingPongEmitterFactory))
//!         .build()?;
//!
//!     let emitter = host
//!         .build_emitter(EmitterDescription {
//!             type_tag: PingPongEmitter::TYPE.to_string(),
//!             id: "ping-1".to_string(),
//!             name: "ping".to_string(),
//!             description: "liveness probe".to_string(),
//!             properties: Some(serde_json::json!({"interval": 1000})),
//!         })
//!         .await?;
//!
//!     let status = emitter.probe_status().await;
//!     println!("faulted: {}", status.bit);
//!     Ok(())
//! }
//! ```
//!
//! ## 模块组织
//!
//! ### 配置模块
//! - RuntimeConfig - 运行时基础配置
//!
//! ### 核心模块
//! - DataEmitter - 发射器统一接口
//! - EmitterRegistry - 工厂注册表
//! - FormatSettings / StateEnvelope - 状态序列化
//!
//! ### 轮询引擎
//! - PollScheduler - 轮询调度器
//! - EmitterRuntime - 发射器共享运行时
//! - RecurringTask - 可取消的后台任务句柄
//!
//! ### 插件模块
//! - PingPongEmitter - ping-pong 存活监测发射器
//! - LivenessMonitor - 存活监测状态机

// ============================================================================
// Conditional Compilation Based on Features
// ============================================================================

// Host facade
#[cfg(feature = "framework")]
pub mod host;

#[cfg(feature = "framework")]
pub use crate::host::{EmitterHost, Host, HostBuilder};

// ============================================================================
// Crate Re-exports (for advanced users)
// ============================================================================

#[cfg(feature = "framework")]
pub use pulsex_config;

#[cfg(feature = "framework")]
pub use pulsex_core;

#[cfg(feature = "framework")]
pub use pulsex_emitter;

#[cfg(feature = "plugins")]
pub use pulsex_plugins;

// ============================================================================
// Prelude Module
// ============================================================================

/// 预导出常用类型
///
/// 通过 `use pulsex::prelude::*;` 导入所有常用类型
pub mod prelude {
    // Common types
    pub use std::result::Result as StdResult;

    #[cfg(feature = "framework")]
    pub use pulsex_config::{ConfigError, RuntimeConfig};

    #[cfg(feature = "framework")]
    pub use pulsex_core::prelude::*;

    #[cfg(feature = "framework")]
    pub use pulsex_emitter::prelude::*;

    #[cfg(feature = "plugins")]
    pub use pulsex_plugins::prelude::*;

    #[cfg(feature = "framework")]
    pub use crate::host::{EmitterHost, Host, HostBuilder};
}

// ============================================================================
// Error Types
// ============================================================================

/// PulseX 统一 Result 类型
pub type Result<T> = std::result::Result<T, Error>;

/// PulseX 统一错误枚举
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// 核心错误
    #[cfg(feature = "framework")]
    #[error(transparent)]
    Core(#[from] pulsex_core::PulseXError),

    /// 配置错误
    #[cfg(feature = "framework")]
    #[error(transparent)]
    Config(#[from] pulsex_config::ConfigError),

    /// IO 错误
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// 自定义错误
    #[error("{0}")]
    Custom(String),
}

// ============================================================================
// Version Information
// ============================================================================

/// PulseX 版本号
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// PulseX 包名
pub const NAME: &str = env!("CARGO_PKG_NAME");
