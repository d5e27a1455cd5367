// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use anyhow::Context;
use domainwatch::application::pipeline::{Pipeline, PipelineDeps, PipelineOptions};
use domainwatch::config::cli::CommandLine;
use domainwatch::config::settings::Settings;
use domainwatch::domain::repositories::finding_sink::FindingSink;
use domainwatch::domain::services::keyword_matcher::{load_seeds, KeywordMatcher};
use domainwatch::domain::services::resolver::DomainResolver;
use domainwatch::infrastructure::certstream::CertStreamFeed;
use domainwatch::infrastructure::dns::SystemResolver;
use domainwatch::infrastructure::storage::FileFindingSink;
use domainwatch::infrastructure::metrics;
use domainwatch::utils::telemetry;
use std::sync::Arc;
use tracing::{info, warn};

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动监控流水线
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CommandLine::parse_args();

    // 1. Load configuration
    let settings = Settings::load(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config))?;

    // 2. Initialize logging and metrics
    telemetry::init_telemetry(&settings.telemetry);
    info!("Starting domainwatch...");
    metrics::init_metrics(settings.metrics_addr()?);

    // 3. Load keywords
    let seeds = load_seeds(&cli.input)
        .await
        .with_context(|| format!("Failed to read keyword list {}", cli.input))?;
    let matcher = KeywordMatcher::new(seeds, cli.keywords_only);
    if matcher.is_empty() {
        warn!("Keyword list {} is empty, nothing will match", cli.input);
    }
    info!("Loaded {} keywords from {}", matcher.len(), cli.input);

    if cli.only_resolving && !cli.resolve {
        warn!("--only-resolving has no effect without --resolve");
    }

    // 4. Initialize collaborators
    let resolver: Option<Arc<dyn DomainResolver>> = if cli.resolve {
        Some(Arc::new(SystemResolver::new(settings.resolver_timeout())))
    } else {
        None
    };

    let sink: Option<Arc<dyn FindingSink>> = if cli.log_to_file {
        let sink = FileFindingSink::open(&settings.output.findings_path)
            .await
            .with_context(|| {
                format!("Failed to open findings file {}", settings.output.findings_path)
            })?;
        info!("Logging found domains to {}", sink.path().display());
        Some(Arc::new(sink))
    } else {
        None
    };

    let feed = CertStreamFeed::new(&settings.feed.url)
        .with_context(|| format!("Invalid feed url {}", settings.feed.url))?;

    let deps = PipelineDeps {
        feed: Arc::new(feed),
        resolver,
        sink,
    };

    // 5. Run until interrupted
    let pipeline = Pipeline::start(&settings, PipelineOptions::from(&cli), matcher, deps);
    pipeline.run_until_interrupted().await;

    Ok(())
}
