//! PulseX 核心契约
//!
//! 定义发射器 trait、数据事件、命令分发、状态序列化和工厂注册表。

pub mod command;
pub mod emitter;
pub mod error;
pub mod event;
pub mod registry;
pub mod state;

// 导出主要类型到 crate root
pub use crate::command::{Command, ExecutionResult, SettingsUpdate};
pub use crate::emitter::{DataEmitter, EmitterDescription, Status};
pub use crate::error::{ErrorContext, PulseXError, PulseXErrorKind, Result};
pub use crate::event::{DataEvent, DataSubscription, EventBus};
pub use crate::registry::{EmitterFactory, EmitterRegistry};
pub use crate::state::{FormatSettings, StateEnvelope};

// 预导出
pub mod prelude {
    pub use crate::command::{Command, ExecutionResult, SettingsUpdate};
    pub use crate::emitter::{DataEmitter, EmitterDescription, Status};
    pub use crate::error::{ErrorContext, PulseXError, PulseXErrorKind, Result};
    pub use crate::event::{DataEvent, DataSubscription, EventBus};
    pub use crate::registry::{EmitterFactory, EmitterRegistry};
    pub use crate::state::{FormatSettings, StateEnvelope};
}
