// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::Deserialize;
use std::collections::BTreeSet;

/// 证书透明度事件
///
/// 事件源推送的一条已解码消息。心跳和未知类型的消息不携带域名，
/// 处理时直接忽略。
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "message_type", rename_all = "snake_case")]
pub enum FeedMessage {
    /// 心跳消息
    Heartbeat,
    /// 新证书记录
    CertificateUpdate { data: CertificateUpdate },
    /// 其他类型
    #[serde(other)]
    Unknown,
}

/// 证书更新内容
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CertificateUpdate {
    /// 叶子证书
    pub leaf_cert: LeafCertificate,
    /// 证书链，第一个元素为签发者证书
    #[serde(default)]
    pub chain: Vec<ChainCertificate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeafCertificate {
    /// 证书覆盖的全部域名
    #[serde(default)]
    pub all_domains: Vec<String>,
    #[serde(default)]
    pub issuer: DistinguishedName,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChainCertificate {
    #[serde(default)]
    pub subject: DistinguishedName,
}

/// 证书主体/签发者名称
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DistinguishedName {
    /// 聚合后的完整名称，例如 `/C=US/O=Let's Encrypt/CN=R3`
    #[serde(default)]
    pub aggregated: Option<String>,
}

impl CertificateUpdate {
    /// 事件内去重后的域名集合
    pub fn unique_domains(&self) -> BTreeSet<&str> {
        self.leaf_cert
            .all_domains
            .iter()
            .map(String::as_str)
            .filter(|domain| !domain.is_empty())
            .collect()
    }

    /// 签发者名称
    ///
    /// 优先使用证书链中第一张证书的主体；证书链为空时退回叶子证书的签发者字段
    pub fn issuer(&self) -> Option<&str> {
        self.chain
            .first()
            .and_then(|cert| cert.subject.aggregated.as_deref())
            .or(self.leaf_cert.issuer.aggregated.as_deref())
    }
}
