//! PulseX 轮询引擎
//!
//! 提供发射器共享运行时、可取消的后台任务句柄和轮询调度器。

pub mod polling;
pub mod runtime;
pub mod task;

// 导出主要类型到 crate root
pub use crate::polling::{PollScheduler, PollSource};
pub use crate::runtime::{EmitterIdentity, EmitterRuntime};
pub use crate::task::RecurringTask;

// 预导出
pub mod prelude {
    pub use crate::polling::{PollScheduler, PollSource};
    pub use crate::runtime::{EmitterIdentity, EmitterRuntime};
    pub use crate::task::RecurringTask;
}
