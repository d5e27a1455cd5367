// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 组装监控流水线并管理其生命周期
pub mod application;

/// 配置模块
///
/// 处理应用程序的配置文件、环境变量和命令行参数
pub mod config;

/// 领域模块
///
/// 包含核心业务实体、服务和外部接口
pub mod domain;

/// 基础设施模块
///
/// 提供外部服务集成，如证书事件源、域名解析、结果文件和指标
pub mod infrastructure;

/// 队列模块
///
/// 实现去重限速的域名队列
pub mod queue;

/// 工具模块
///
/// 提供通用的工具函数和辅助功能
pub mod utils;

/// 工作器模块
///
/// 实现后台任务处理和工作器管理
pub mod workers;
