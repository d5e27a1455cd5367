// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 外部协作者接口模块
///
/// 定义事件源和结果输出的抽象接口，具体实现位于基础设施层
pub mod certificate_feed;
pub mod finding_sink;
