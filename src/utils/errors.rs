// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use thiserror::Error;

use crate::domain::repositories::certificate_feed::FeedError;
use crate::domain::repositories::finding_sink::SinkError;
use crate::queue::QueueError;

/// Worker错误类型
#[derive(Error, Debug)]
pub enum WorkerError {
    #[error("Queue error: {0}")]
    Queue(#[from] QueueError),

    #[error("Feed error: {0}")]
    Feed(#[from] FeedError),

    #[error("Sink error: {0}")]
    Sink(#[from] SinkError),

    #[error("Worker panicked: {0}")]
    Panicked(String),
}

impl WorkerError {
    /// 从捕获到的 panic 负载中提取描述
    pub fn from_panic(payload: Box<dyn std::any::Any + Send>) -> Self {
        let message = if let Some(message) = payload.downcast_ref::<&str>() {
            (*message).to_string()
        } else if let Some(message) = payload.downcast_ref::<String>() {
            message.clone()
        } else {
            "unknown panic payload".to_string()
        };
        WorkerError::Panicked(message)
    }
}
