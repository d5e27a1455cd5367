// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use domainwatch::application::pipeline::{Pipeline, PipelineDeps, PipelineOptions};
use domainwatch::domain::models::counters::CountersSnapshot;
use domainwatch::domain::repositories::finding_sink::FindingSink;
use domainwatch::domain::services::keyword_matcher::KeywordMatcher;
use domainwatch::domain::services::resolver::DomainResolver;
use domainwatch::infrastructure::storage::FileFindingSink;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;
use std::time::Duration;

use super::helpers::{certificate_update, test_settings, wait_until, MemorySink, ScriptedFeed, StaticResolver};

const OTHER_CA: &str = "/C=US/O=Example Trust/CN=Example CA";
const LETS_ENCRYPT: &str = "/C=US/O=Let's Encrypt/CN=R3";

fn options(workers: usize) -> PipelineOptions {
    PipelineOptions {
        worker_count: workers,
        only_resolving: false,
        skip_lets_encrypt: false,
    }
}

fn bank_matcher() -> KeywordMatcher {
    KeywordMatcher::new(["bank"], false)
}

#[tokio::test]
async fn test_end_to_end_single_match() {
    let feed = Arc::new(ScriptedFeed::new(vec![vec![certificate_update(
        &["secure-bank.example.com", "unrelated.org"],
        OTHER_CA,
    )]]));
    let sink = Arc::new(MemorySink::default());

    let pipeline = Pipeline::start(
        &test_settings(),
        options(3),
        bank_matcher(),
        PipelineDeps {
            feed,
            resolver: None,
            sink: Some(sink.clone() as Arc<dyn FindingSink>),
        },
    );

    let counters = pipeline.counters();
    let queue = pipeline.queue();
    wait_until("both domains to be withdrawn", || {
        counters.checked() == 2 && queue.pending() == 0
    })
    .await;

    let totals = pipeline.shutdown().await;
    assert_eq!(totals, CountersSnapshot { checked: 2, found: 1 });
    assert_eq!(sink.lines(), vec!["secure-bank.example.com"]);
}

#[tokio::test]
async fn test_duplicate_names_across_events_are_processed_once() {
    let feed = Arc::new(ScriptedFeed::new(vec![vec![
        certificate_update(&["bank.example.com", "www.bank.example.com"], OTHER_CA),
        certificate_update(&["bank.example.com"], OTHER_CA),
    ]]));
    let sink = Arc::new(MemorySink::default());

    let pipeline = Pipeline::start(
        &test_settings(),
        options(2),
        bank_matcher(),
        PipelineDeps {
            feed,
            resolver: None,
            sink: Some(sink.clone() as Arc<dyn FindingSink>),
        },
    );

    let counters = pipeline.counters();
    wait_until("both findings", || counters.found() == 2).await;

    let totals = pipeline.shutdown().await;
    assert_eq!(totals, CountersSnapshot { checked: 2, found: 2 });

    let mut lines = sink.lines();
    lines.sort();
    assert_eq!(lines, vec!["bank.example.com", "www.bank.example.com"]);
}

#[tokio::test]
async fn test_skipped_issuer_offers_nothing() {
    let feed = Arc::new(ScriptedFeed::new(vec![vec![
        certificate_update(&["bank.letsencrypt-issued.com"], LETS_ENCRYPT),
        certificate_update(&["bank.other-ca.com"], OTHER_CA),
    ]]));
    let sink = Arc::new(MemorySink::default());

    let pipeline = Pipeline::start(
        &test_settings(),
        PipelineOptions {
            skip_lets_encrypt: true,
            ..options(1)
        },
        bank_matcher(),
        PipelineDeps {
            feed,
            resolver: None,
            sink: Some(sink.clone() as Arc<dyn FindingSink>),
        },
    );

    let counters = pipeline.counters();
    wait_until("the unfiltered finding", || counters.found() == 1).await;

    let totals = pipeline.shutdown().await;
    assert_eq!(totals.checked, 1);
    assert_eq!(sink.lines(), vec!["bank.other-ca.com"]);
}

#[tokio::test]
async fn test_only_resolving_drops_unresolved_matches() {
    let ip = IpAddr::V4(Ipv4Addr::new(192, 0, 2, 1));
    let feed = Arc::new(ScriptedFeed::new(vec![vec![certificate_update(
        &["bank-a.example.com", "bank-b.example.com"],
        OTHER_CA,
    )]]));
    let sink = Arc::new(MemorySink::default());
    let resolver = Arc::new(StaticResolver::new(vec![("bank-a.example.com", ip)]));

    let pipeline = Pipeline::start(
        &test_settings(),
        PipelineOptions {
            only_resolving: true,
            ..options(2)
        },
        bank_matcher(),
        PipelineDeps {
            feed,
            resolver: Some(resolver as Arc<dyn DomainResolver>),
            sink: Some(sink.clone() as Arc<dyn FindingSink>),
        },
    );

    let counters = pipeline.counters();
    let queue = pipeline.queue();
    wait_until("both domains to be withdrawn", || {
        counters.checked() == 2 && queue.pending() == 0
    })
    .await;

    // Workers finish in-flight items before shutdown returns
    let totals = pipeline.shutdown().await;
    assert_eq!(totals.found, 1);
    assert_eq!(sink.lines(), vec!["bank-a.example.com,192.0.2.1"]);
}

#[tokio::test]
async fn test_findings_are_appended_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("logs").join("domains.log");
    let sink = FileFindingSink::open(&path).await.unwrap();

    let feed = Arc::new(ScriptedFeed::new(vec![vec![certificate_update(
        &["*.secure-bank.example.com", "unrelated.org"],
        OTHER_CA,
    )]]));

    let pipeline = Pipeline::start(
        &test_settings(),
        options(1),
        bank_matcher(),
        PipelineDeps {
            feed,
            resolver: None,
            sink: Some(Arc::new(sink) as Arc<dyn FindingSink>),
        },
    );

    let counters = pipeline.counters();
    wait_until("the finding", || counters.found() == 1).await;
    pipeline.shutdown().await;

    let content = tokio::fs::read_to_string(&path).await.unwrap();
    assert_eq!(content, "secure-bank.example.com\n");
}

#[tokio::test]
async fn test_shutdown_does_not_wait_for_stalled_queue() {
    let mut settings = test_settings();
    settings.queue_size = 1;
    settings.rate_limit_sleep = 30.0;

    let domains: Vec<String> = (0..6).map(|i| format!("bank-{i}.example.com")).collect();
    let domains: Vec<&str> = domains.iter().map(String::as_str).collect();
    let feed = Arc::new(ScriptedFeed::new(vec![vec![certificate_update(&domains, OTHER_CA)]]));

    let pipeline = Pipeline::start(
        &settings,
        options(1),
        bank_matcher(),
        PipelineDeps {
            feed,
            resolver: None,
            sink: None,
        },
    );

    let counters = pipeline.counters();
    wait_until("the queue to back up", || counters.checked() >= 3).await;

    let totals = tokio::time::timeout(Duration::from_secs(5), pipeline.shutdown())
        .await
        .expect("shutdown should not wait for the rate limit");
    assert!(totals.checked < 6);
    assert_eq!(totals.found, 1);
}
