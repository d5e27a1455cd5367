// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use metrics::{describe_counter, describe_gauge};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing::{info, warn};

/// 初始化指标系统
///
/// 未配置监听地址时不安装导出器，指标宏为空操作
pub fn init_metrics(addr: Option<SocketAddr>) {
    let Some(addr) = addr else {
        return;
    };

    if let Err(e) = PrometheusBuilder::new().with_http_listener(addr).install() {
        warn!("Failed to install Prometheus recorder: {}", e);
        return;
    }

    describe_counter!(
        "domainwatch_domains_checked_total",
        "Unique domains admitted to the queue"
    );
    describe_counter!(
        "domainwatch_domains_found_total",
        "Domains matching the keyword set that were logged"
    );
    describe_counter!(
        "domainwatch_processing_failures_total",
        "Domains dropped because processing failed"
    );
    describe_counter!(
        "domainwatch_feed_reconnects_total",
        "Times the certificate feed was resubscribed"
    );
    describe_counter!(
        "domainwatch_events_skipped_total",
        "Certificate events skipped by the issuer filter"
    );
    describe_gauge!("domainwatch_queue_depth", "Domains waiting in the queue");
    describe_gauge!(
        "domainwatch_throughput_per_second",
        "Domains checked per second over the last reporting interval"
    );

    info!("Metrics exporter listening on {}", addr);
}
