// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::models::finding::Finding;

/// 结果输出错误类型
#[derive(Error, Debug)]
pub enum SinkError {
    /// IO错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// 命中结果输出特质
///
/// 实现必须支持并发调用，每条结果作为完整的一行追加写入
#[async_trait]
pub trait FindingSink: Send + Sync {
    /// 追加一条命中结果
    async fn append(&self, finding: &Finding) -> Result<(), SinkError>;
}
