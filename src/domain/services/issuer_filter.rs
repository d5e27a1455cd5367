// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::cert_event::CertificateUpdate;

pub const LETS_ENCRYPT: &str = "Let's Encrypt";

/// 签发者过滤器
///
/// 签发者名称包含任一配置项时，整条证书事件被跳过
#[derive(Debug, Clone, Default)]
pub struct IssuerFilter {
    skipped: Vec<String>,
}

impl IssuerFilter {
    pub fn new<I, S>(skipped: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            skipped: skipped
                .into_iter()
                .map(Into::into)
                .filter(|name: &String| !name.is_empty())
                .collect(),
        }
    }

    /// 根据命令行开关和配置文件构造过滤器
    pub fn from_options(skip_lets_encrypt: bool, extra: &[String]) -> Self {
        let mut skipped = Vec::with_capacity(extra.len() + 1);
        if skip_lets_encrypt {
            skipped.push(LETS_ENCRYPT.to_string());
        }
        skipped.extend(extra.iter().cloned());
        Self::new(skipped)
    }

    pub fn is_empty(&self) -> bool {
        self.skipped.is_empty()
    }

    /// 判断证书事件是否应被跳过
    pub fn should_skip(&self, update: &CertificateUpdate) -> bool {
        if self.skipped.is_empty() {
            return false;
        }
        match update.issuer() {
            Some(issuer) => self.skipped.iter().any(|name| issuer.contains(name.as_str())),
            None => false,
        }
    }
}
