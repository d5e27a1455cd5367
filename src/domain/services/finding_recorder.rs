// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;

use crate::domain::models::counters::PipelineCounters;
use crate::domain::models::finding::Finding;
use crate::domain::repositories::finding_sink::{FindingSink, SinkError};

/// 命中结果记录器
///
/// 将命中结果追加到输出（启用文件日志时），并增加命中计数
pub struct FindingRecorder {
    counters: Arc<PipelineCounters>,
    sink: Option<Arc<dyn FindingSink>>,
}

impl FindingRecorder {
    pub fn new(counters: Arc<PipelineCounters>, sink: Option<Arc<dyn FindingSink>>) -> Self {
        Self { counters, sink }
    }

    /// 记录一条命中结果
    ///
    /// 写入失败时不计数，错误交给调用方处理
    pub async fn record(&self, finding: &Finding) -> Result<(), SinkError> {
        if let Some(sink) = &self.sink {
            sink.append(finding).await?;
        }
        self.counters.record_found();
        Ok(())
    }
}
