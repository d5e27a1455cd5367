// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施模块
///
/// 提供外部协作者的具体实现：证书事件源、系统解析器、结果文件和指标导出
pub mod certstream;
pub mod dns;
pub mod metrics;
pub mod storage;
