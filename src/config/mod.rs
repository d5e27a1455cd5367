// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 配置模块
///
/// 处理配置文件、环境变量和命令行参数
pub mod cli;
pub mod settings;
