// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::fmt;

const WILDCARD_PREFIX: &str = "*.";

/// 域名实体
///
/// 表示一个已经规范化的域名。证书中的通配符域名（`*.example.com`）
/// 在构造时去掉前缀，之后的匹配、解析和记录都使用去掉前缀后的形式。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Domain(String);

impl Domain {
    /// 从原始域名构造规范化域名
    ///
    /// 只去掉一个前导的 `*.`，其余部分保持原样
    pub fn from_raw(raw: &str) -> Self {
        let normalized = raw.strip_prefix(WILDCARD_PREFIX).unwrap_or(raw);
        Self(normalized.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Domain {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
