// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 包含关键词匹配、签发者过滤、命中记录和域名解析接口
pub mod finding_recorder;
pub mod issuer_filter;
pub mod keyword_matcher;
pub mod resolver;
