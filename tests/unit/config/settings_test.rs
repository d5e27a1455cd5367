// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 配置设置测试模块
///
/// 测试内置默认值和配置文件加载

#[cfg(test)]
mod tests {
    use domainwatch::config::settings::{Settings, SettingsError, DEFAULT_FEED_URL};
    use domainwatch::utils::retry_policy::RetryPolicy;
    use std::io::Write;
    use std::time::Duration;

    #[test]
    fn test_builtin_defaults() {
        let settings = Settings::from_defaults().unwrap();

        assert_eq!(settings.queue_size, 1000);
        assert_eq!(settings.update_interval(), Duration::from_secs(2));
        assert_eq!(settings.rate_limit(), Duration::ZERO);
        assert_eq!(settings.shutdown_timeout(), Duration::from_secs(30));
        assert_eq!(settings.feed.url, DEFAULT_FEED_URL);
        assert_eq!(settings.telemetry.filter, "info,domainwatch=debug");
        assert!(!settings.telemetry.json);
    }

    #[test]
    fn test_exponential_backoff_from_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(
            b"queue_size: 10\nupdate_interval: 1\nrate_limit_sleep: 0\nfeed:\n  reconnect_delay: 1\n  max_reconnect_delay: 8\n  exponential_backoff: true\n",
        )
        .unwrap();

        let settings = Settings::load(file.path().to_str().unwrap()).unwrap();
        let policy = RetryPolicy::from_settings(&settings.feed);

        assert!(policy.exponential_backoff);
        assert_eq!(policy.initial_backoff, Duration::from_secs(1));
        assert_eq!(policy.max_backoff, Duration::from_secs(8));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = Settings::load("/nonexistent/domainwatch/config.yaml");
        assert!(matches!(result, Err(SettingsError::Config(_))));
    }
}
