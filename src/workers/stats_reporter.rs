// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use metrics::gauge;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::info;

use crate::domain::models::counters::{CountersSnapshot, PipelineCounters};
use crate::queue::DomainQueue;
use crate::utils::errors::WorkerError;
use crate::workers::{shutdown_requested, Worker};

/// 一次统计采样
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatsSample {
    pub checked: u64,
    pub found: u64,
    /// 上一个间隔内每秒新增的域名数
    pub rate: f64,
}

impl StatsSample {
    /// 根据当前计数和上一次的已检查数计算采样
    ///
    /// 已检查数不超过1时返回 `None`，避免启动时输出无意义的报告
    pub fn compute(current: CountersSnapshot, previous_checked: u64, interval: Duration) -> Option<Self> {
        if current.checked <= 1 {
            return None;
        }

        let delta = current.checked.saturating_sub(previous_checked);
        let secs = interval.as_secs_f64();
        let rate = if secs > 0.0 { delta as f64 / secs } else { 0.0 };

        Some(Self {
            checked: current.checked,
            found: current.found,
            rate,
        })
    }
}

impl fmt::Display for StatsSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} domains checked ({:.0}b/s), {} domains found",
            self.checked, self.rate, self.found
        )
    }
}

/// 统计报告器
///
/// 按固定间隔读取计数器并输出吞吐量，只读，不阻塞其他组件
pub struct StatsReporter {
    counters: Arc<PipelineCounters>,
    queue: Arc<DomainQueue>,
    interval: Duration,
    shutdown: watch::Receiver<bool>,
}

impl StatsReporter {
    pub fn new(
        counters: Arc<PipelineCounters>,
        queue: Arc<DomainQueue>,
        interval: Duration,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            counters,
            queue,
            interval,
            shutdown,
        }
    }

    fn report(&self, previous_checked: u64) -> u64 {
        let current = self.counters.snapshot();
        gauge!("domainwatch_queue_depth").set(self.queue.pending() as f64);

        if let Some(sample) = StatsSample::compute(current, previous_checked, self.interval) {
            gauge!("domainwatch_throughput_per_second").set(sample.rate);
            info!(queued = self.queue.pending(), "{}", sample);
        }

        current.checked
    }
}

#[async_trait]
impl Worker for StatsReporter {
    async fn run(&self) -> Result<(), WorkerError> {
        let mut shutdown = self.shutdown.clone();
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut previous_checked = 0;
        loop {
            tokio::select! {
                _ = shutdown_requested(&mut shutdown) => break,
                _ = ticker.tick() => {
                    previous_checked = self.report(previous_checked);
                }
            }
        }

        Ok(())
    }

    fn name(&self) -> &str {
        "stats-reporter"
    }
}
