// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use metrics::counter;
use std::sync::atomic::{AtomicU64, Ordering};

/// 流水线计数器
///
/// 进程级共享的统计数据，通过 `Arc` 显式传递给队列、工作器和统计报告器。
/// 计数只增不减。
#[derive(Debug, Default)]
pub struct PipelineCounters {
    /// 已接收的不重复域名数量（等于去重集合的大小）
    checked: AtomicU64,
    /// 已记录的命中数量
    found: AtomicU64,
}

/// 计数器快照
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CountersSnapshot {
    pub checked: u64,
    pub found: u64,
}

impl PipelineCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_checked(&self) {
        self.checked.fetch_add(1, Ordering::Relaxed);
        counter!("domainwatch_domains_checked_total").increment(1);
    }

    pub fn record_found(&self) {
        self.found.fetch_add(1, Ordering::Relaxed);
        counter!("domainwatch_domains_found_total").increment(1);
    }

    pub fn checked(&self) -> u64 {
        self.checked.load(Ordering::Relaxed)
    }

    pub fn found(&self) -> u64 {
        self.found.load(Ordering::Relaxed)
    }

    pub fn snapshot(&self) -> CountersSnapshot {
        CountersSnapshot {
            checked: self.checked(),
            found: self.found(),
        }
    }
}
