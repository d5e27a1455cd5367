// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;
use tracing::info;

use crate::config::cli::CommandLine;
use crate::config::settings::Settings;
use crate::domain::models::counters::{CountersSnapshot, PipelineCounters};
use crate::domain::repositories::certificate_feed::CertificateFeed;
use crate::domain::repositories::finding_sink::FindingSink;
use crate::domain::services::finding_recorder::FindingRecorder;
use crate::domain::services::issuer_filter::IssuerFilter;
use crate::domain::services::keyword_matcher::KeywordMatcher;
use crate::domain::services::resolver::DomainResolver;
use crate::queue::DomainQueue;
use crate::utils::retry_policy::RetryPolicy;
use crate::workers::domain_worker::{DomainWorker, ResolvePolicy};
use crate::workers::ingestion_worker::IngestionWorker;
use crate::workers::manager::WorkerManager;
use crate::workers::stats_reporter::StatsReporter;

// === Section: Options ===

/// 运行选项
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub worker_count: usize,
    pub only_resolving: bool,
    pub skip_lets_encrypt: bool,
}

impl From<&CommandLine> for PipelineOptions {
    fn from(cli: &CommandLine) -> Self {
        Self {
            worker_count: cli.worker_count(),
            only_resolving: cli.only_resolving,
            skip_lets_encrypt: cli.skip_lets_encrypt,
        }
    }
}

/// 外部依赖
///
/// `resolver` 为空时不解析；`sink` 为空时不写入结果文件
pub struct PipelineDeps {
    pub feed: Arc<dyn CertificateFeed>,
    pub resolver: Option<Arc<dyn DomainResolver>>,
    pub sink: Option<Arc<dyn FindingSink>>,
}

// === Section: Pipeline ===

/// 监控流水线
///
/// 组装队列、计数器和各个工作器，并负责有序关闭
pub struct Pipeline {
    manager: WorkerManager,
    queue: Arc<DomainQueue>,
    counters: Arc<PipelineCounters>,
}

impl Pipeline {
    /// 启动流水线
    ///
    /// 启动一个摄取任务、`worker_count` 个域名工作器和一个统计报告器
    pub fn start(
        settings: &Settings,
        options: PipelineOptions,
        matcher: KeywordMatcher,
        deps: PipelineDeps,
    ) -> Self {
        let counters = Arc::new(PipelineCounters::new());
        let queue = Arc::new(DomainQueue::new(
            settings.queue_size,
            settings.rate_limit(),
            counters.clone(),
        ));
        let mut manager = WorkerManager::new(settings.shutdown_timeout());

        let matcher = Arc::new(matcher);
        let recorder = Arc::new(FindingRecorder::new(counters.clone(), deps.sink));
        let resolve = match deps.resolver {
            Some(resolver) => ResolvePolicy::Enabled {
                resolver,
                only_resolving: options.only_resolving,
            },
            None => ResolvePolicy::Disabled,
        };

        for id in 0..options.worker_count.max(1) {
            manager.spawn_worker(Arc::new(DomainWorker::new(
                id,
                queue.clone(),
                matcher.clone(),
                resolve.clone(),
                recorder.clone(),
                manager.subscribe(),
            )));
        }

        manager.spawn_background(Arc::new(StatsReporter::new(
            counters.clone(),
            queue.clone(),
            settings.update_interval(),
            manager.subscribe(),
        )));

        let issuer_filter =
            IssuerFilter::from_options(options.skip_lets_encrypt, &settings.feed.skip_issuers);
        manager.spawn_producer(Arc::new(IngestionWorker::new(
            deps.feed,
            queue.clone(),
            issuer_filter,
            RetryPolicy::from_settings(&settings.feed),
            manager.subscribe(),
        )));

        info!(
            "Started {} workers matching {} keywords",
            manager.worker_count(),
            matcher.len()
        );

        Self {
            manager,
            queue,
            counters,
        }
    }

    pub fn counters(&self) -> Arc<PipelineCounters> {
        self.counters.clone()
    }

    pub fn queue(&self) -> Arc<DomainQueue> {
        self.queue.clone()
    }

    /// 等待 Ctrl-C 后关闭
    pub async fn run_until_interrupted(self) -> CountersSnapshot {
        self.manager.wait_for_shutdown().await;
        self.shutdown().await
    }

    /// 关闭流水线并返回最终计数
    ///
    /// 仍在队列中的域名被丢弃
    pub async fn shutdown(mut self) -> CountersSnapshot {
        self.manager.shutdown().await;

        let discarded = self.queue.pending();
        if discarded > 0 {
            info!("Discarded {} queued domains", discarded);
        }

        let totals = self.counters.snapshot();
        info!(
            "{} domains checked, {} domains found",
            totals.checked, totals.found
        );
        totals
    }
}
