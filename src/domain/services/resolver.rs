// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use std::net::IpAddr;

/// 域名解析特质
///
/// 每次调用只尝试一次，不缓存、不重试。任何查询失败都归一为 `None`，
/// 不会向上传播底层错误。
#[async_trait]
pub trait DomainResolver: Send + Sync {
    /// 解析域名，成功时返回IP地址
    async fn resolve(&self, domain: &str) -> Option<IpAddr>;
}
