// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use std::net::IpAddr;
use std::time::Duration;
use tokio::net::lookup_host;
use tracing::debug;

use crate::domain::services::resolver::DomainResolver;

/// 系统域名解析器
///
/// 使用操作系统解析器查询，单次尝试并带超时，优先返回IPv4地址
pub struct SystemResolver {
    timeout: Duration,
}

impl SystemResolver {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl DomainResolver for SystemResolver {
    async fn resolve(&self, domain: &str) -> Option<IpAddr> {
        let lookup = tokio::time::timeout(self.timeout, lookup_host((domain, 0))).await;

        let addrs: Vec<IpAddr> = match lookup {
            Ok(Ok(addrs)) => addrs.map(|addr| addr.ip()).collect(),
            Ok(Err(e)) => {
                debug!("Lookup of {} failed: {}", domain, e);
                return None;
            }
            Err(_) => {
                debug!("Lookup of {} timed out after {:?}", domain, self.timeout);
                return None;
            }
        };

        addrs
            .iter()
            .find(|ip| ip.is_ipv4())
            .or_else(|| addrs.first())
            .copied()
    }
}
