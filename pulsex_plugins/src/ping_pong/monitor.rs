//! 存活监测状态机
//!
//! 以最近一次应答时间为基准判定对端存活：超过故障阈值（3 倍探测间隔）
//! 未收到应答即为故障。过期检查时钟独立于探测发送时钟，周期为 2 倍
//! 探测间隔；收到应答后立即重检，不等下一次时钟跳动。

use pulsex_emitter::task::RecurringTask;
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;
use tokio::time::Instant;

/// 故障状态的边沿变化
///
/// 只有状态真正翻转时产生；已处于同一状态的重复检查不产生变化，
/// 观察者因此不会被重复通知。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultTransition {
    /// 进入故障
    Faulted,
    /// 恢复健康
    Cleared,
}

/// 监视器元数据快照
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorMetadata {
    /// 探测间隔（毫秒）
    pub interval_ms: u64,
    /// 故障阈值（毫秒）
    pub fault_threshold_ms: u64,
    /// 距最近一次应答的毫秒数；`None` 表示从未收到应答
    pub last_ack_age_ms: Option<u64>,
}

/// 监视器内部状态
struct MonitorState {
    /// 最近一次应答时刻；`None` 表示从未收到
    last_ack: Option<Instant>,
    /// 探测间隔
    interval: Duration,
    /// 故障阈值，始终为当前间隔的 3 倍
    fault_threshold: Duration,
    /// 当前是否处于故障
    faulted: bool,
}

/// 存活监视器
///
/// 每个实例独占自己的状态和过期检查任务；[`dispose`](Self::dispose)
/// 或句柄被丢弃时任务随之取消。
pub struct LivenessMonitor {
    state: Mutex<MonitorState>,
    checker: Mutex<RecurringTask>,
}

impl LivenessMonitor {
    /// 创建监视器（过期检查时钟未启动）
    pub fn new(interval_ms: u64) -> Self {
        let interval = Duration::from_millis(interval_ms);
        Self {
            state: Mutex::new(MonitorState {
                last_ack: None,
                interval,
                fault_threshold: interval * 3,
                faulted: false,
            }),
            checker: Mutex::new(RecurringTask::new()),
        }
    }

    /// 当前探测间隔（毫秒）
    pub fn interval_ms(&self) -> u64 {
        self.state
            .lock()
            .map(|state| state.interval.as_millis() as u64)
            .unwrap_or(0)
    }

    /// 当前故障阈值（毫秒）
    pub fn fault_threshold_ms(&self) -> u64 {
        self.state
            .lock()
            .map(|state| state.fault_threshold.as_millis() as u64)
            .unwrap_or(0)
    }

    /// 过期检查时钟周期（毫秒），始终为探测间隔的 2 倍
    pub fn checker_period_ms(&self) -> u64 {
        self.interval_ms() * 2
    }

    /// 当前是否处于故障
    pub fn is_faulted(&self) -> bool {
        self.state
            .lock()
            .map(|state| state.faulted)
            .unwrap_or(false)
    }

    /// 重新评估过期状态
    ///
    /// 状态翻转时返回对应的边沿变化，否则返回 `None`。从未收到应答
    /// 视为已过期。
    pub fn check_staleness(&self) -> Option<FaultTransition> {
        let transition = {
            let Ok(mut state) = self.state.lock() else {
                return None;
            };
            evaluate(&mut state, Instant::now())
        };

        match transition {
            Some(FaultTransition::Faulted) => {
                tracing::warn!("存活监测进入故障: 超过阈值未收到应答");
            }
            Some(FaultTransition::Cleared) => {
                tracing::info!("存活监测恢复健康");
            }
            None => {}
        }
        transition
    }

    /// 记录收到一次应答并立即重检
    ///
    /// 新应答可以当场清除故障，不必等待下一次时钟跳动。
    pub fn record_ack(&self) -> Option<FaultTransition> {
        if let Ok(mut state) = self.state.lock() {
            state.last_ack = Some(Instant::now());
        }
        self.check_staleness()
    }

    /// 启动过期检查时钟
    ///
    /// 周期为 2 倍探测间隔。任务仅持有弱引用，监视器被释放后自行退出。
    pub fn start_checker(self: &Arc<Self>) {
        let period = Duration::from_millis(self.checker_period_ms());
        let weak = Arc::downgrade(self);
        let handle = spawn_checker(period, weak);

        if let Ok(mut checker) = self.checker.lock() {
            checker.replace(handle);
        }
    }

    /// 切换探测间隔
    ///
    /// 故障阈值（3 倍）和过期检查周期（2 倍）一并按新间隔重算，
    /// 检查时钟在运行中则按新周期重启。
    pub fn reconfigure(self: &Arc<Self>, interval_ms: u64) {
        let restart = {
            let Ok(mut state) = self.state.lock() else {
                return;
            };
            let interval = Duration::from_millis(interval_ms);
            state.interval = interval;
            state.fault_threshold = interval * 3;

            self.checker
                .lock()
                .map(|checker| checker.is_running())
                .unwrap_or(false)
        };

        if restart {
            self.start_checker();
        }
        // 阈值变化可能当场翻转故障状态
        self.check_staleness();
    }

    /// 取消过期检查时钟；可重复调用，未启动时也安全
    pub fn dispose(&self) {
        if let Ok(mut checker) = self.checker.lock() {
            checker.cancel();
        }
    }

    /// 过期检查时钟是否在运行
    pub fn checker_running(&self) -> bool {
        self.checker
            .lock()
            .map(|checker| checker.is_running())
            .unwrap_or(false)
    }

    /// 元数据快照
    pub fn metadata(&self) -> MonitorMetadata {
        let now = Instant::now();
        let Ok(state) = self.state.lock() else {
            return MonitorMetadata {
                interval_ms: 0,
                fault_threshold_ms: 0,
                last_ack_age_ms: None,
            };
        };
        MonitorMetadata {
            interval_ms: state.interval.as_millis() as u64,
            fault_threshold_ms: state.fault_threshold.as_millis() as u64,
            last_ack_age_ms: state
                .last_ack
                .map(|at| now.duration_since(at).as_millis() as u64),
        }
    }
}

/// 纯状态转移：过期则进入故障，否则恢复健康，只在边沿返回变化
fn evaluate(state: &mut MonitorState, now: Instant) -> Option<FaultTransition> {
    let stale = match state.last_ack {
        None => true,
        Some(at) => now.duration_since(at) > state.fault_threshold,
    };

    if stale {
        if !state.faulted {
            state.faulted = true;
            return Some(FaultTransition::Faulted);
        }
    } else if state.faulted {
        state.faulted = false;
        return Some(FaultTransition::Cleared);
    }
    None
}

/// 启动过期检查循环
fn spawn_checker(period: Duration, monitor: Weak<LivenessMonitor>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut timer = tokio::time::interval_at(Instant::now() + period, period);
        loop {
            timer.tick().await;
            let Some(monitor) = monitor.upgrade() else {
                break;
            };
            monitor.check_staleness();
        }
    })
}
