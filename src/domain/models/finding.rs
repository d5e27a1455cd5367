// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::fmt;
use std::net::IpAddr;

use super::domain_name::Domain;

/// 命中结果
///
/// 与关键词集合匹配成功的域名，在启用解析时附带解析得到的IP地址。
/// 写入日志时一行一条：`domain` 或 `domain,ip`。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    /// 规范化后的域名
    pub domain: Domain,
    /// 解析得到的IP地址
    pub ip: Option<IpAddr>,
}

impl Finding {
    pub fn new(domain: Domain, ip: Option<IpAddr>) -> Self {
        Self { domain, ip }
    }

    /// 生成写入日志的一行内容（不含换行符）
    pub fn log_line(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.ip {
            Some(ip) => write!(f, "{},{}", self.domain, ip),
            None => write!(f, "{}", self.domain),
        }
    }
}
