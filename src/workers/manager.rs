// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{timeout_at, Instant};
use tracing::{error, info, warn};

use crate::workers::Worker;

struct ManagedWorker {
    name: String,
    handle: JoinHandle<()>,
}

/// 关闭结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShutdownReport {
    /// 在超时前正常退出的工作器数量
    pub joined: usize,
    /// 超时后被强制中止的工作器数量
    pub aborted: usize,
}

/// 工作管理器
///
/// 持有关闭信号的发送端和所有后台任务的句柄，负责启动和有序关闭。
/// 任务分三类：
/// - 生产者：关闭时直接中止，它可能正挂起在已满的队列上
/// - 工作器：关闭时等待其完成当前条目，超过 `shutdown_timeout` 后中止
/// - 后台任务：工作器退出后再停止
pub struct WorkerManager {
    shutdown_tx: watch::Sender<bool>,
    shutdown_timeout: Duration,
    producers: Vec<ManagedWorker>,
    workers: Vec<ManagedWorker>,
    background: Vec<ManagedWorker>,
}

impl WorkerManager {
    pub fn new(shutdown_timeout: Duration) -> Self {
        let (shutdown_tx, _) = watch::channel(false);
        Self {
            shutdown_tx,
            shutdown_timeout,
            producers: Vec::new(),
            workers: Vec::new(),
            background: Vec::new(),
        }
    }

    /// 订阅关闭信号
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.shutdown_tx.subscribe()
    }

    pub fn spawn_producer(&mut self, worker: Arc<dyn Worker>) {
        self.producers.push(spawn(worker));
    }

    pub fn spawn_worker(&mut self, worker: Arc<dyn Worker>) {
        self.workers.push(spawn(worker));
    }

    pub fn spawn_background(&mut self, worker: Arc<dyn Worker>) {
        self.background.push(spawn(worker));
    }

    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    /// 等待关闭信号
    ///
    /// 阻塞直到收到 Ctrl-C
    pub async fn wait_for_shutdown(&self) {
        match signal::ctrl_c().await {
            Ok(()) => info!("Shutdown signal received"),
            Err(err) => error!("Unable to listen for shutdown signal: {}", err),
        }
    }

    /// 有序关闭所有任务
    pub async fn shutdown(&mut self) -> ShutdownReport {
        info!("Shutting down workers...");
        self.shutdown_tx.send_replace(true);

        for producer in self.producers.drain(..) {
            producer.handle.abort();
            let _ = producer.handle.await;
        }

        let mut report = ShutdownReport::default();
        let deadline = Instant::now() + self.shutdown_timeout;
        for mut worker in self.workers.drain(..) {
            match timeout_at(deadline, &mut worker.handle).await {
                Ok(Ok(())) => report.joined += 1,
                Ok(Err(e)) => {
                    error!("{} terminated abnormally: {}", worker.name, e);
                    report.joined += 1;
                }
                Err(_) => {
                    warn!("{} did not stop within {:?}, aborting", worker.name, self.shutdown_timeout);
                    worker.handle.abort();
                    report.aborted += 1;
                }
            }
        }

        for task in self.background.drain(..) {
            if timeout_at(Instant::now() + self.shutdown_timeout, task.handle).await.is_err() {
                warn!("{} did not stop in time", task.name);
            }
        }

        info!("Workers shut down successfully");
        report
    }
}

fn spawn(worker: Arc<dyn Worker>) -> ManagedWorker {
    let name = worker.name().to_string();
    let task_name = name.clone();
    let handle = tokio::spawn(async move {
        if let Err(e) = worker.run().await {
            error!("{} exited with error: {}", task_name, e);
        }
    });
    ManagedWorker { name, handle }
}
