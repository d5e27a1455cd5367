// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 命令行参数测试模块
///
/// 验证参数解析结果与流水线选项之间的映射

#[cfg(test)]
mod tests {
    use clap::Parser;
    use domainwatch::application::pipeline::PipelineOptions;
    use domainwatch::config::cli::{CommandLine, DEFAULT_WORKERS};

    #[test]
    fn test_zero_threads_falls_back_to_default() {
        let cli = CommandLine::parse_from(["domainwatch", "-t", "0"]);
        assert_eq!(PipelineOptions::from(&cli).worker_count, DEFAULT_WORKERS);
    }

    #[test]
    fn test_options_follow_flags() {
        let cli = CommandLine::parse_from([
            "domainwatch",
            "--resolve",
            "--only-resolving",
            "--skip-lets-encrypt",
            "--threads",
            "12",
        ]);
        let options = PipelineOptions::from(&cli);

        assert_eq!(options.worker_count, 12);
        assert!(options.only_resolving);
        assert!(options.skip_lets_encrypt);
    }

    #[test]
    fn test_unknown_flag_is_rejected() {
        assert!(CommandLine::try_parse_from(["domainwatch", "--bogus"]).is_err());
    }
}
