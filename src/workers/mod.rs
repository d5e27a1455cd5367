// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 工作器模块
///
/// 提供证书事件摄取、域名处理和统计报告等后台任务，
/// 以及统一的生命周期管理
pub mod domain_worker;
pub mod ingestion_worker;
pub mod manager;
pub mod stats_reporter;
pub mod worker;

pub use worker::Worker;

use tokio::sync::watch;

/// 等待关闭信号
///
/// 信号置为真或发送端被丢弃时返回
pub(crate) async fn shutdown_requested(rx: &mut watch::Receiver<bool>) {
    let _ = rx.wait_for(|stopped| *stopped).await;
}
