//! PulseX 官方插件集合
//!
//! 提供官方维护的发射器实现，如 ping-pong 存活监测发射器。

pub mod ping_pong;

// 预导出
pub mod prelude {
    pub use crate::ping_pong::factory::PingPongEmitterFactory;
    pub use crate::ping_pong::monitor::{FaultTransition, LivenessMonitor, MonitorMetadata};
    pub use crate::ping_pong::protocol::{Decoded, Message, MessageType};
    pub use crate::ping_pong::PingPongEmitter;
}
