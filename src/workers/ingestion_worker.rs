// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use futures::StreamExt;
use metrics::counter;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::domain::models::cert_event::FeedMessage;
use crate::domain::repositories::certificate_feed::CertificateFeed;
use crate::domain::services::issuer_filter::IssuerFilter;
use crate::queue::{Admission, DomainQueue, QueueError};
use crate::utils::errors::WorkerError;
use crate::utils::retry_policy::RetryPolicy;
use crate::workers::{shutdown_requested, Worker};

/// 证书事件摄取工作器
///
/// 订阅事件源，把每条证书事件中的域名提交到队列。
/// 连接断开或出错后按退避策略等待并重新订阅，直到收到关闭信号。
pub struct IngestionWorker {
    feed: Arc<dyn CertificateFeed>,
    queue: Arc<DomainQueue>,
    issuer_filter: IssuerFilter,
    retry_policy: RetryPolicy,
    shutdown: watch::Receiver<bool>,
}

impl IngestionWorker {
    pub fn new(
        feed: Arc<dyn CertificateFeed>,
        queue: Arc<DomainQueue>,
        issuer_filter: IssuerFilter,
        retry_policy: RetryPolicy,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            feed,
            queue,
            issuer_filter,
            retry_policy,
            shutdown,
        }
    }

    /// 处理一条事件消息
    ///
    /// # 返回值
    ///
    /// * `Ok(usize)` - 本条消息新加入队列的域名数量
    /// * `Err(QueueError)` - 队列已关闭
    pub async fn handle_message(&self, message: FeedMessage) -> Result<usize, QueueError> {
        let FeedMessage::CertificateUpdate { data } = message else {
            return Ok(0);
        };

        if self.issuer_filter.should_skip(&data) {
            counter!("domainwatch_events_skipped_total").increment(1);
            debug!("Skipping certificate issued by {:?}", data.issuer());
            return Ok(0);
        }

        let mut accepted = 0;
        for domain in data.unique_domains() {
            if self.queue.offer(domain).await? == Admission::Accepted {
                accepted += 1;
            }
        }
        Ok(accepted)
    }

    /// 运行一次订阅，直到事件流结束或出错
    ///
    /// `connected` 在连接建立后置为真，用于重置退避计数
    async fn consume(&self, connected: &mut bool) -> Result<(), WorkerError> {
        let mut stream = self.feed.connect().await?;
        *connected = true;
        info!("Connected to certificate feed {}", self.feed.describe());

        while let Some(message) = stream.next().await {
            self.handle_message(message?).await?;
        }

        Ok(())
    }
}

#[async_trait]
impl Worker for IngestionWorker {
    async fn run(&self) -> Result<(), WorkerError> {
        let mut shutdown = self.shutdown.clone();
        let mut failures: u32 = 0;

        loop {
            info!("Waiting for certificate transparency events - this could take a few minutes to queue up...");

            let mut connected = false;
            let outcome = tokio::select! {
                _ = shutdown_requested(&mut shutdown) => break,
                outcome = self.consume(&mut connected) => outcome,
            };

            if connected {
                failures = 0;
            }
            failures = failures.saturating_add(1);

            match outcome {
                Ok(()) => info!("Certificate feed closed the connection"),
                Err(WorkerError::Queue(QueueError::Closed)) => break,
                Err(e) => warn!("Certificate feed failed: {}", e),
            }

            let delay = self.retry_policy.calculate_backoff(failures);
            info!("Reconnecting to certificate feed in {:?}", delay);
            counter!("domainwatch_feed_reconnects_total").increment(1);

            tokio::select! {
                _ = shutdown_requested(&mut shutdown) => break,
                _ = tokio::time::sleep(delay) => {}
            }
        }

        debug!("Ingestion stopped");
        Ok(())
    }

    fn name(&self) -> &str {
        "ingestion"
    }
}
