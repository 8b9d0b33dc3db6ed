//! 轮询调度器
//!
//! 按固定间隔调用发射器的探测函数，并把结果广播给监听者。
//! 首次发射发生在启动后一个完整周期，而不是启动瞬间。

use crate::runtime::EmitterRuntime;
use crate::task::RecurringTask;
use pulsex_core::error::Result;
use serde_json::Value;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// 轮询数据源
///
/// `poll` 在每个轮询周期被调用一次，返回要发射的负载。
pub trait PollSource: Send + Sync {
    /// 产生一次探测负载
    fn poll(&self) -> Result<Value>;
}

/// 调度器内部状态
struct SchedulerInner {
    /// 轮询任务句柄
    task: RecurringTask,
    /// 启动时接线的数据源和运行时，重启时复用
    wired: Option<(Arc<dyn PollSource>, Arc<EmitterRuntime>)>,
}

/// 轮询调度器
///
/// 每个发射器实例独占一个调度器；`set_interval` 在运行中切换节奏。
pub struct PollScheduler {
    /// 轮询间隔（毫秒）
    interval_ms: AtomicU64,
    inner: Mutex<SchedulerInner>,
}

impl PollScheduler {
    /// 创建调度器（未启动）
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms: AtomicU64::new(interval_ms),
            inner: Mutex::new(SchedulerInner {
                task: RecurringTask::new(),
                wired: None,
            }),
        }
    }

    /// 当前轮询间隔（毫秒）
    pub fn interval_ms(&self) -> u64 {
        self.interval_ms.load(Ordering::SeqCst)
    }

    /// 启动轮询
    ///
    /// 重复调用会先停掉旧的轮询任务再按当前间隔重启。
    pub fn start(&self, source: Arc<dyn PollSource>, runtime: Arc<EmitterRuntime>) {
        let Ok(mut inner) = self.inner.lock() else {
            return;
        };
        let handle = spawn_poll_loop(self.interval_ms(), source.clone(), runtime.clone());
        inner.task.replace(handle);
        runtime.set_connected(true);
        inner.wired = Some((source, runtime));
    }

    /// 停止轮询；可重复调用
    pub fn stop(&self) {
        let Ok(mut inner) = self.inner.lock() else {
            return;
        };
        inner.task.cancel();
        if let Some((_, runtime)) = &inner.wired {
            runtime.set_connected(false);
        }
    }

    /// 切换轮询间隔
    ///
    /// 正在运行时按新节奏重启轮询任务，否则仅记录间隔。
    pub fn set_interval(&self, interval_ms: u64) {
        self.interval_ms.store(interval_ms, Ordering::SeqCst);
        let Ok(mut inner) = self.inner.lock() else {
            return;
        };
        if inner.task.is_running() {
            if let Some((source, runtime)) = inner.wired.clone() {
                let handle = spawn_poll_loop(interval_ms, source, runtime);
                inner.task.replace(handle);
            }
        }
    }

    /// 轮询是否在运行
    pub fn is_running(&self) -> bool {
        self.inner
            .lock()
            .map(|inner| inner.task.is_running())
            .unwrap_or(false)
    }
}

/// 启动轮询循环任务
fn spawn_poll_loop(
    interval_ms: u64,
    source: Arc<dyn PollSource>,
    runtime: Arc<EmitterRuntime>,
) -> tokio::task::JoinHandle<()> {
    let period = Duration::from_millis(interval_ms);
    tokio::spawn(async move {
        // 跳过 interval 的立即首跳：第一次发射在一个完整周期之后
        let mut timer = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
        loop {
            timer.tick().await;
            match source.poll() {
                Ok(payload) => {
                    runtime.notify_listeners(payload);
                }
                Err(e) => {
                    tracing::warn!(emitter_id = %runtime.id(), error = %e, "轮询失败");
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::EmitterIdentity;
    use serde_json::json;

    struct CountingSource;

    impl PollSource for CountingSource {
        fn poll(&self) -> Result<Value> {
            Ok(json!({"type": "PING"}))
        }
    }

    fn sample_runtime() -> Arc<EmitterRuntime> {
        Arc::new(EmitterRuntime::new(
            EmitterIdentity::new("e1", "n", "d"),
            64,
        ))
    }

    fn drain(sub: &mut pulsex_core::event::DataSubscription) -> usize {
        let mut count = 0;
        while sub.try_recv().is_some() {
            count += 1;
        }
        count
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_cadence() {
        let runtime = sample_runtime();
        let scheduler = PollScheduler::new(100);
        let mut sub = runtime.on_data();

        scheduler.start(Arc::new(CountingSource), runtime.clone());
        assert!(scheduler.is_running());
        assert!(runtime.connected());

        // 100ms 周期下 550ms 内恰好 5 次发射（不含启动瞬间）
        tokio::time::sleep(Duration::from_millis(550)).await;
        assert_eq!(drain(&mut sub), 5);

        scheduler.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_halts_emission() {
        let runtime = sample_runtime();
        let scheduler = PollScheduler::new(100);
        let mut sub = runtime.on_data();

        scheduler.start(Arc::new(CountingSource), runtime.clone());
        tokio::time::sleep(Duration::from_millis(250)).await;
        drain(&mut sub);

        scheduler.stop();
        assert!(!scheduler.is_running());
        assert!(!runtime.connected());

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(drain(&mut sub), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_twice_is_safe() {
        let runtime = sample_runtime();
        let scheduler = PollScheduler::new(100);
        scheduler.start(Arc::new(CountingSource), runtime.clone());
        scheduler.stop();
        scheduler.stop();
        assert!(!scheduler.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_set_interval_restarts_cadence() {
        let runtime = sample_runtime();
        let scheduler = PollScheduler::new(1000);
        let mut sub = runtime.on_data();

        scheduler.start(Arc::new(CountingSource), runtime.clone());
        scheduler.set_interval(100);
        assert_eq!(scheduler.interval_ms(), 100);

        tokio::time::sleep(Duration::from_millis(550)).await;
        assert_eq!(drain(&mut sub), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_set_interval_while_stopped() {
        let runtime = sample_runtime();
        let scheduler = PollScheduler::new(1000);
        scheduler.set_interval(100);
        assert_eq!(scheduler.interval_ms(), 100);
        assert!(!scheduler.is_running());

        let mut sub = runtime.on_data();
        scheduler.start(Arc::new(CountingSource), runtime.clone());
        tokio::time::sleep(Duration::from_millis(350)).await;
        assert_eq!(drain(&mut sub), 3);
    }
}
