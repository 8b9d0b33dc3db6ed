//! 数据事件与监听器注册
//!
//! 发射器产生的每条数据都包装为带时间戳的 [`DataEvent`]，
//! 通过广播通道分发给所有订阅者。

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::sync::broadcast;

/// 数据事件信封
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DataEvent {
    /// 产生事件的发射器 id
    pub emitter_id: String,
    /// 事件时间戳（Unix 毫秒）
    pub timestamp_ms: u64,
    /// 事件负载
    pub payload: Value,
}

impl DataEvent {
    /// 创建新事件，时间戳取当前时间
    pub fn new(emitter_id: impl Into<String>, payload: Value) -> Self {
        Self {
            emitter_id: emitter_id.into(),
            timestamp_ms: epoch_ms(),
            payload,
        }
    }
}

/// 当前 Unix 毫秒时间戳
pub fn epoch_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// 数据事件总线
///
/// 包装一个广播通道，并缓存最近一次发布的事件供 `probe_current_data` 查询。
pub struct EventBus {
    sender: broadcast::Sender<DataEvent>,
    last: Mutex<Option<DataEvent>>,
}

impl EventBus {
    /// 创建事件总线
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            last: Mutex::new(None),
        }
    }

    /// 订阅数据事件
    ///
    /// 返回的订阅句柄被丢弃时自动退订。
    pub fn subscribe(&self) -> DataSubscription {
        DataSubscription {
            inner: self.sender.subscribe(),
        }
    }

    /// 发布事件给所有订阅者，返回接收到事件的订阅者数量
    pub fn publish(&self, event: DataEvent) -> usize {
        if let Ok(mut last) = self.last.lock() {
            *last = Some(event.clone());
        }
        // 没有订阅者时 send 返回 Err，事件仍被缓存
        self.sender.send(event).unwrap_or(0)
    }

    /// 最近一次发布的事件
    pub fn last_event(&self) -> Option<DataEvent> {
        self.last.lock().ok().and_then(|last| last.clone())
    }

    /// 当前订阅者数量
    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

/// 数据事件订阅句柄
pub struct DataSubscription {
    inner: broadcast::Receiver<DataEvent>,
}

impl DataSubscription {
    /// 等待下一条事件
    ///
    /// 通道关闭时返回 `None`；落后于通道容量时跳过被挤掉的事件继续接收。
    pub async fn recv(&mut self) -> Option<DataEvent> {
        loop {
            match self.inner.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// 非阻塞地取一条事件
    pub fn try_recv(&mut self) -> Option<DataEvent> {
        loop {
            match self.inner.try_recv() {
                Ok(event) => return Some(event),
                Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
                Err(_) => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_publish_without_subscribers() {
        let bus = EventBus::new(8);
        let delivered = bus.publish(DataEvent::new("e1", json!({"n": 1})));
        assert_eq!(delivered, 0);
        // 事件仍进入缓存
        assert!(bus.last_event().is_some());
    }

    #[tokio::test]
    async fn test_subscribe_and_recv() {
        let bus = EventBus::new(8);
        let mut sub = bus.subscribe();

        bus.publish(DataEvent::new("e1", json!({"n": 1})));

        let event = sub.recv().await.unwrap();
        assert_eq!(event.emitter_id, "e1");
        assert_eq!(event.payload, json!({"n": 1}));
    }

    #[tokio::test]
    async fn test_multiple_subscribers() {
        let bus = EventBus::new(8);
        let mut sub1 = bus.subscribe();
        let mut sub2 = bus.subscribe();

        let delivered = bus.publish(DataEvent::new("e1", json!(42)));
        assert_eq!(delivered, 2);

        assert_eq!(sub1.recv().await.unwrap().payload, json!(42));
        assert_eq!(sub2.recv().await.unwrap().payload, json!(42));
    }

    #[test]
    fn test_last_event_cache() {
        let bus = EventBus::new(8);
        assert!(bus.last_event().is_none());

        bus.publish(DataEvent::new("e1", json!(1)));
        bus.publish(DataEvent::new("e1", json!(2)));

        assert_eq!(bus.last_event().unwrap().payload, json!(2));
    }

    #[test]
    fn test_drop_unsubscribes() {
        let bus = EventBus::new(8);
        let sub = bus.subscribe();
        assert_eq!(bus.receiver_count(), 1);
        drop(sub);
        assert_eq!(bus.receiver_count(), 0);
    }

    #[tokio::test]
    async fn test_try_recv_empty() {
        let bus = EventBus::new(8);
        let mut sub = bus.subscribe();
        assert!(sub.try_recv().is_none());
    }
}
