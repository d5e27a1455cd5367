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

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

pub const DEFAULT_FEED_URL: &str = "wss://certstream.calidog.io/";

/// 配置错误类型
#[derive(Error, Debug)]
pub enum SettingsError {
    /// 配置文件缺失或格式错误
    #[error("Failed to load configuration: {0}")]
    Config(#[from] ConfigError),

    /// 配置项取值不合法
    #[error("Invalid configuration: {0}")]
    Invalid(#[from] ValidationErrors),

    /// 地址格式错误
    #[error("Invalid metrics address '{0}'")]
    InvalidAddress(String),
}

/// 应用程序配置设置
///
/// 顶层三个键为 `config.yaml` 的基础配置，其余分组均有默认值
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct Settings {
    /// 队列容量
    #[validate(range(min = 1))]
    pub queue_size: usize,
    /// 统计报告间隔（秒）
    #[validate(range(min = 0.1, max = 86400.0))]
    pub update_interval: f64,
    /// 两次出队之间的最小间隔（秒）
    #[validate(range(min = 0.0, max = 3600.0))]
    pub rate_limit_sleep: f64,
    /// 关闭时等待工作器处理完当前域名的最长时间（秒）
    #[validate(range(min = 0.0, max = 86400.0))]
    pub shutdown_timeout: f64,
    /// 事件源配置
    #[validate(nested)]
    pub feed: FeedSettings,
    /// 域名解析配置
    #[validate(nested)]
    pub resolver: ResolverSettings,
    /// 输出配置
    pub output: OutputSettings,
    /// 日志与指标配置
    pub telemetry: TelemetrySettings,
}

/// 事件源配置设置
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct FeedSettings {
    /// 事件源地址
    #[validate(url)]
    pub url: String,
    /// 断线后的重连间隔（秒）
    #[validate(range(min = 0.0, max = 86400.0))]
    pub reconnect_delay: f64,
    /// 指数退避的最大间隔（秒）
    #[validate(range(min = 0.0, max = 86400.0))]
    pub max_reconnect_delay: f64,
    /// 是否启用指数退避
    pub exponential_backoff: bool,
    /// 需要跳过的签发者名称
    pub skip_issuers: Vec<String>,
}

/// 域名解析配置设置
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ResolverSettings {
    /// 单次解析超时（秒）
    #[validate(range(min = 0.1, max = 300.0))]
    pub timeout: f64,
}

/// 输出配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct OutputSettings {
    /// 命中结果文件路径
    pub findings_path: String,
}

/// 日志与指标配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetrySettings {
    /// 日志过滤规则，`RUST_LOG` 优先
    pub filter: String,
    /// 是否输出JSON格式日志
    pub json: bool,
    /// Prometheus 指标监听地址，未设置时不启动
    pub metrics_addr: Option<String>,
}

impl Settings {
    /// 从配置文件加载配置
    ///
    /// 依次应用默认值、配置文件和 `DOMAINWATCH` 前缀的环境变量。
    /// 配置文件必须存在。
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载并通过校验的配置
    /// * `Err(SettingsError)` - 配置加载或校验失败
    pub fn load(path: &str) -> Result<Self, SettingsError> {
        let builder = Self::defaults()?
            .add_source(File::with_name(path).required(true))
            .add_source(Environment::with_prefix("DOMAINWATCH").separator("__"));

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        settings.metrics_addr()?;
        Ok(settings)
    }

    /// 仅使用内置默认值构建配置
    pub fn from_defaults() -> Result<Self, SettingsError> {
        let settings: Settings = Self::defaults()?.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("queue_size", 1000)?
            .set_default("update_interval", 2.0)?
            .set_default("rate_limit_sleep", 0.0)?
            .set_default("shutdown_timeout", 30.0)?
            // Default feed settings
            .set_default("feed.url", DEFAULT_FEED_URL)?
            .set_default("feed.reconnect_delay", 10.0)?
            .set_default("feed.max_reconnect_delay", 300.0)?
            .set_default("feed.exponential_backoff", false)?
            .set_default("feed.skip_issuers", Vec::<String>::new())?
            // Default resolver settings
            .set_default("resolver.timeout", 5.0)?
            // Default output settings
            .set_default("output.findings_path", "domains.log")?
            // Default telemetry settings
            .set_default("telemetry.filter", "info,domainwatch=debug")?
            .set_default("telemetry.json", false)
    }

    pub fn update_interval(&self) -> Duration {
        Duration::from_secs_f64(self.update_interval)
    }

    pub fn rate_limit(&self) -> Duration {
        Duration::from_secs_f64(self.rate_limit_sleep)
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs_f64(self.shutdown_timeout)
    }

    pub fn resolver_timeout(&self) -> Duration {
        Duration::from_secs_f64(self.resolver.timeout)
    }

    /// 解析指标监听地址
    pub fn metrics_addr(&self) -> Result<Option<SocketAddr>, SettingsError> {
        match &self.telemetry.metrics_addr {
            None => Ok(None),
            Some(addr) => addr
                .parse()
                .map(Some)
                .map_err(|_| SettingsError::InvalidAddress(addr.clone())),
        }
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
