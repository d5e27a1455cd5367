// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了系统的核心业务实体，包括：
/// - 证书事件（cert_event）：事件源推送的已解码消息
/// - 计数器（counters）：进程级共享的统计数据
/// - 域名（domain_name）：规范化后的候选域名
/// - 命中结果（finding）：与关键词匹配成功的域名
pub mod cert_event;
pub mod counters;
pub mod domain_name;
pub mod finding;
