//! Ping-pong 存活监测示例
//!
//! 演示两个发射器互为对端：各自的数据事件由一座"桥"转发为对方的
//! 入站命令，PING 被应答为 PONG，双方保持健康；一方停机后另一方
//! 在故障阈值内翻转为故障。

use pulsex_core::command::Command;
use pulsex_core::emitter::DataEmitter;
use pulsex_plugins::prelude::*;
use std::sync::Arc;
use std::time::Duration;

/// 把 `from` 的数据事件转发为 `to` 的入站命令
///
/// 真实部署中这里是网络传输；示例里一个内存桥就够了。
fn bridge(from: Arc<PingPongEmitter>, to: Arc<PingPongEmitter>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut sub = from.on_data();
        while let Some(event) = sub.recv().await {
            to.send_command(Command::new("bridge", event.payload)).await;
        }
    })
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().init();

    println!("=== PulseX ping-pong 存活监测示例 ===\n");

    let left = Arc::new(PingPongEmitter::new(
        "left",
        "左端",
        "向右端探测存活",
        500,
    ));
    let right = Arc::new(PingPongEmitter::new(
        "right",
        "右端",
        "向左端探测存活",
        500,
    ));

    let left_to_right = bridge(left.clone(), right.clone());
    let right_to_left = bridge(right.clone(), left.clone());

    println!("双向桥接完成，探测间隔 500ms，运行 3 秒...\n");
    tokio::time::sleep(Duration::from_secs(3)).await;

    let left_status = left.probe_status().await;
    let right_status = right.probe_status().await;
    println!("✅ 左端: faulted={} connected={}", left_status.bit, left_status.connected);
    println!("✅ 右端: faulted={} connected={}", right_status.bit, right_status.connected);

    println!("\n停掉右端（连同两侧桥接），再等 2.5 秒...\n");
    right.dispose().await;
    left_to_right.abort();
    right_to_left.abort();
    tokio::time::sleep(Duration::from_millis(2500)).await;

    let left_status = left.probe_status().await;
    println!("⚠️ 左端: faulted={} (阈值 {}ms 内无应答)",
        left_status.bit,
        left.metadata().fault_threshold_ms,
    );

    left.dispose().await;
    println!("\n示例结束");
}
