// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use dashmap::DashSet;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{mpsc, Mutex};
use tokio::time::{sleep_until, Instant};

use crate::domain::models::counters::PipelineCounters;

/// 队列错误类型
#[derive(Error, Debug)]
pub enum QueueError {
    /// 队列已关闭
    #[error("Queue closed")]
    Closed,
}

/// 入队结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// 首次出现，已加入队列
    Accepted,
    /// 本次运行中已经见过，未入队
    Duplicate,
}

struct WithdrawState {
    receiver: mpsc::Receiver<String>,
    next_yield: Option<Instant>,
}

/// 去重限速域名队列
///
/// 有界FIFO队列：
/// - 入队时按域名去重，已见过的域名不占用容量；队列已满时入队方挂起，形成背压
/// - 出队时限速，任意两次出队之间至少间隔 `rate_limit`，对所有工作器共同生效
///
/// 去重集合在进程生命周期内只增不减。
pub struct DomainQueue {
    seen: DashSet<String>,
    sender: mpsc::Sender<String>,
    withdraw_state: Mutex<WithdrawState>,
    rate_limit: Duration,
    capacity: usize,
    counters: Arc<PipelineCounters>,
}

impl DomainQueue {
    /// 创建新的队列实例
    ///
    /// # 参数
    ///
    /// * `capacity` - 缓冲区容量，至少为1
    /// * `rate_limit` - 两次出队之间的最小间隔
    /// * `counters` - 共享计数器，每接收一个新域名计数一次
    pub fn new(capacity: usize, rate_limit: Duration, counters: Arc<PipelineCounters>) -> Self {
        let capacity = capacity.max(1);
        let (sender, receiver) = mpsc::channel(capacity);

        Self {
            seen: DashSet::new(),
            sender,
            withdraw_state: Mutex::new(WithdrawState {
                receiver,
                next_yield: None,
            }),
            rate_limit,
            capacity,
            counters,
        }
    }

    /// 提交候选域名
    ///
    /// # 返回值
    ///
    /// * `Ok(Admission::Accepted)` - 新域名，已入队
    /// * `Ok(Admission::Duplicate)` - 已见过，无任何副作用
    /// * `Err(QueueError)` - 队列已关闭
    pub async fn offer(&self, domain: impl Into<String>) -> Result<Admission, QueueError> {
        let domain = domain.into();

        // insert is atomic per key, concurrent offers of one name admit it once
        if !self.seen.insert(domain.clone()) {
            return Ok(Admission::Duplicate);
        }
        self.counters.record_checked();

        self.sender
            .send(domain)
            .await
            .map_err(|_| QueueError::Closed)?;

        Ok(Admission::Accepted)
    }

    /// 取出下一个域名
    ///
    /// 先等到允许的出队时间，再从缓冲区取元素，队列为空时挂起。
    /// 返回前把下一次允许出队的时间推后 `rate_limit`。
    /// 等待期间被取消时元素仍留在缓冲区中。
    pub async fn withdraw(&self) -> Result<String, QueueError> {
        let mut state = self.withdraw_state.lock().await;

        if let Some(next_yield) = state.next_yield {
            sleep_until(next_yield).await;
        }

        let domain = state.receiver.recv().await.ok_or(QueueError::Closed)?;
        state.next_yield = Some(Instant::now() + self.rate_limit);

        Ok(domain)
    }

    /// 本次运行中已接收的不重复域名数量
    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }

    /// 当前缓冲区中等待处理的域名数量
    pub fn pending(&self) -> usize {
        self.capacity - self.sender.capacity()
    }
}
