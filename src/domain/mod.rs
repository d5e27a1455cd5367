// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含系统的核心业务逻辑，包括：
/// - 领域模型（models）：证书事件、域名、命中结果和计数器
/// - 外部接口（repositories）：事件源和结果输出的抽象接口
/// - 服务（services）：关键词匹配、签发者过滤和命中记录
///
/// 领域层不依赖于任何外部实现。
pub mod models;
pub mod repositories;
pub mod services;
