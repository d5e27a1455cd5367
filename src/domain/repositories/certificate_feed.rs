// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use futures::stream::BoxStream;
use thiserror::Error;

use crate::domain::models::cert_event::FeedMessage;

/// 事件源错误类型
#[derive(Error, Debug)]
pub enum FeedError {
    /// 连接失败
    #[error("Failed to connect to feed: {0}")]
    Connect(String),

    /// 传输错误
    #[error("Feed transport error: {0}")]
    Transport(String),

    /// 解码错误
    #[error("Failed to decode feed message: {0}")]
    Decode(String),
}

/// 事件流
///
/// 流结束表示连接已断开，调用方需要重新订阅
pub type FeedStream = BoxStream<'static, Result<FeedMessage, FeedError>>;

/// 证书透明度事件源特质
///
/// 事件源负责连接和解码，断线后由调用方决定何时重连
#[async_trait]
pub trait CertificateFeed: Send + Sync {
    /// 建立一次订阅，返回事件流
    async fn connect(&self) -> Result<FeedStream, FeedError>;

    /// 事件源描述，用于日志
    fn describe(&self) -> String;
}
