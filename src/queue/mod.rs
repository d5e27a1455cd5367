// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 队列模块
///
/// 提供去重限速的候选域名队列，连接事件摄取端和工作器
pub mod domain_queue;

pub use domain_queue::{Admission, DomainQueue, QueueError};
