// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use domainwatch::application::pipeline::{Pipeline, PipelineDeps, PipelineOptions};
use domainwatch::domain::models::cert_event::FeedMessage;
use domainwatch::domain::repositories::finding_sink::FindingSink;
use domainwatch::domain::services::keyword_matcher::KeywordMatcher;
use std::sync::Arc;

use super::helpers::{certificate_update, test_settings, wait_until, MemorySink, ScriptedFeed};

const CA: &str = "/O=Example Trust/CN=Example CA";

#[tokio::test]
async fn test_feed_is_resubscribed_after_stream_ends() {
    let feed = Arc::new(ScriptedFeed::new(vec![
        vec![
            FeedMessage::Heartbeat,
            certificate_update(&["login-paypal.example.com"], CA),
        ],
        vec![
            certificate_update(&["login-paypal.example.com", "paypal-support.example.net"], CA),
            FeedMessage::Heartbeat,
        ],
    ]));
    let sink = Arc::new(MemorySink::default());

    let pipeline = Pipeline::start(
        &test_settings(),
        PipelineOptions {
            worker_count: 2,
            only_resolving: false,
            skip_lets_encrypt: false,
        },
        KeywordMatcher::new(["paypal"], true),
        PipelineDeps {
            feed: feed.clone(),
            resolver: None,
            sink: Some(sink.clone() as Arc<dyn FindingSink>),
        },
    );

    let counters = pipeline.counters();
    wait_until("findings from both sessions", || counters.found() == 2).await;
    assert!(feed.connects() >= 2);

    let totals = pipeline.shutdown().await;
    // The name repeated in the second session is not offered again
    assert_eq!(totals.checked, 2);

    let mut lines = sink.lines();
    lines.sort();
    assert_eq!(lines, vec!["login-paypal.example.com", "paypal-support.example.net"]);
}
