// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use clap::Parser;

pub const DEFAULT_WORKERS: usize = 5;

/// 命令行参数
#[derive(Parser, Debug, Clone)]
#[command(name = "domainwatch")]
#[command(about = "Find interesting domains by watching certificate transparency logs.")]
pub struct CommandLine {
    /// Resolve matching domains
    #[arg(long)]
    pub resolve: bool,

    /// Only log domains resolving to IP addresses
    #[arg(long)]
    pub only_resolving: bool,

    /// Skip certs (and thus listed domains) issued by Let's Encrypt CA
    #[arg(long)]
    pub skip_lets_encrypt: bool,

    /// Number of workers to spawn (defaults to 5 when unset or zero)
    #[arg(short = 't', long)]
    pub threads: Option<usize>,

    /// Log found domains to the findings file
    #[arg(short = 'l', long = "log")]
    pub log_to_file: bool,

    /// Treat the input as keywords and match their permutations
    #[arg(long)]
    pub keywords_only: bool,

    /// Configuration file
    #[arg(short = 'c', long, default_value = "config.yaml")]
    pub config: String,

    /// Keyword list, one entry per line
    #[arg(short = 'i', long, default_value = "input_domains.txt")]
    pub input: String,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// 工作器数量
    pub fn worker_count(&self) -> usize {
        match self.threads {
            Some(count) if count > 0 => count,
            _ => DEFAULT_WORKERS,
        }
    }
}
