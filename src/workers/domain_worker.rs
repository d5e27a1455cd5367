// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use futures::FutureExt;
use metrics::counter;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

use crate::domain::models::domain_name::Domain;
use crate::domain::models::finding::Finding;
use crate::domain::services::finding_recorder::FindingRecorder;
use crate::domain::services::keyword_matcher::KeywordMatcher;
use crate::domain::services::resolver::DomainResolver;
use crate::queue::{DomainQueue, QueueError};
use crate::utils::errors::WorkerError;
use crate::workers::{shutdown_requested, Worker};

/// 解析策略
#[derive(Clone)]
pub enum ResolvePolicy {
    /// 不解析，命中即记录
    Disabled,
    /// 解析；`only_resolving` 为真时丢弃无法解析的命中
    Enabled {
        resolver: Arc<dyn DomainResolver>,
        only_resolving: bool,
    },
}

/// 域名工作器
///
/// 循环执行：取出域名 → 规范化 → 关键词匹配 → （可选）解析 → 记录。
/// 单个域名处理失败只丢弃该域名，工作器继续处理下一个。
pub struct DomainWorker {
    name: String,
    queue: Arc<DomainQueue>,
    matcher: Arc<KeywordMatcher>,
    resolve: ResolvePolicy,
    recorder: Arc<FindingRecorder>,
    shutdown: watch::Receiver<bool>,
}

impl DomainWorker {
    pub fn new(
        id: usize,
        queue: Arc<DomainQueue>,
        matcher: Arc<KeywordMatcher>,
        resolve: ResolvePolicy,
        recorder: Arc<FindingRecorder>,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            name: format!("domain-worker-{id}"),
            queue,
            matcher,
            resolve,
            recorder,
            shutdown,
        }
    }

    /// 处理单个域名
    ///
    /// # 返回值
    ///
    /// * `Ok(Some(Finding))` - 命中并已记录
    /// * `Ok(None)` - 未命中，或仅记录可解析域名时解析失败
    /// * `Err(WorkerError)` - 记录失败
    #[instrument(skip(self), fields(worker = %self.name))]
    pub async fn process(&self, raw: &str) -> Result<Option<Finding>, WorkerError> {
        let domain = Domain::from_raw(raw);
        if !self.matcher.matches(domain.as_str()) {
            return Ok(None);
        }

        let finding = match &self.resolve {
            ResolvePolicy::Disabled => {
                info!("Found domain '{}'", domain);
                Finding::new(domain, None)
            }
            ResolvePolicy::Enabled {
                resolver,
                only_resolving,
            } => match resolver.resolve(domain.as_str()).await {
                Some(ip) => {
                    info!("Found domain '{}', resolving with IP '{}'", domain, ip);
                    Finding::new(domain, Some(ip))
                }
                None if *only_resolving => {
                    debug!("Found domain '{}', not resolving to an IP, dropped", domain);
                    return Ok(None);
                }
                None => {
                    info!("Found domain '{}', not resolving to an IP", domain);
                    Finding::new(domain, None)
                }
            },
        };

        self.recorder.record(&finding).await?;
        Ok(Some(finding))
    }

    async fn process_guarded(&self, raw: &str) {
        let outcome = AssertUnwindSafe(self.process(raw))
            .catch_unwind()
            .await
            .unwrap_or_else(|payload| Err(WorkerError::from_panic(payload)));

        if let Err(e) = outcome {
            counter!("domainwatch_processing_failures_total").increment(1);
            warn!("{} dropped domain '{}': {}", self.name, raw, e);
        }
    }
}

#[async_trait]
impl Worker for DomainWorker {
    async fn run(&self) -> Result<(), WorkerError> {
        debug!("{} started", self.name);
        let mut shutdown = self.shutdown.clone();

        loop {
            // Shutdown is only observed between items
            let raw = tokio::select! {
                biased;
                _ = shutdown_requested(&mut shutdown) => break,
                next = self.queue.withdraw() => match next {
                    Ok(raw) => raw,
                    Err(QueueError::Closed) => break,
                },
            };

            self.process_guarded(&raw).await;
        }

        debug!("{} stopped", self.name);
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
