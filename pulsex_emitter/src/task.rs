//! 可取消的后台任务句柄
//!
//! 周期性后台任务（轮询、过期检查）统一用 [`RecurringTask`] 持有，
//! 取消是幂等的，句柄被丢弃时任务随之终止。

use tokio::task::JoinHandle;

/// 周期性后台任务句柄
#[derive(Debug, Default)]
pub struct RecurringTask {
    handle: Option<JoinHandle<()>>,
}

impl RecurringTask {
    /// 创建未启动的空句柄
    pub fn new() -> Self {
        Self { handle: None }
    }

    /// 包装一个已启动的任务
    pub fn spawned(handle: JoinHandle<()>) -> Self {
        Self {
            handle: Some(handle),
        }
    }

    /// 替换为新任务，旧任务先被取消
    pub fn replace(&mut self, handle: JoinHandle<()>) {
        self.cancel();
        self.handle = Some(handle);
    }

    /// 取消任务；可重复调用，未启动时也安全
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    /// 任务是否仍在运行
    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }
}

impl Drop for RecurringTask {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    #[test]
    fn test_new_is_not_running() {
        let task = RecurringTask::new();
        assert!(!task.is_running());
    }

    #[test]
    fn test_cancel_without_start() {
        let mut task = RecurringTask::new();
        task.cancel();
        task.cancel();
        assert!(!task.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_task() {
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let mut task = RecurringTask::spawned(tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_millis(10));
            loop {
                interval.tick().await;
                counter_clone.fetch_add(1, Ordering::SeqCst);
            }
        }));

        tokio::time::sleep(Duration::from_millis(35)).await;
        assert!(task.is_running());

        task.cancel();
        tokio::task::yield_now().await;
        assert!(!task.is_running());

        let ticks = counter.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(counter.load(Ordering::SeqCst), ticks);
    }

    #[tokio::test(start_paused = true)]
    async fn test_double_cancel_is_idempotent() {
        let mut task = RecurringTask::spawned(tokio::spawn(async {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }));
        task.cancel();
        task.cancel();
        assert!(!task.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_replace_cancels_previous() {
        let first_done = Arc::new(AtomicU32::new(0));
        let first_clone = first_done.clone();

        let mut task = RecurringTask::spawned(tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            first_clone.fetch_add(1, Ordering::SeqCst);
        }));

        task.replace(tokio::spawn(async {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }));

        tokio::time::sleep(Duration::from_millis(200)).await;
        // 被替换的任务在触发前就已取消
        assert_eq!(first_done.load(Ordering::SeqCst), 0);
        assert!(task.is_running());
    }
}
