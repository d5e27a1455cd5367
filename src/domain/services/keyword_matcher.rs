// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

/// 关键词匹配器
///
/// 持有启动时确定的关键词集合，判断域名中是否包含任一关键词（区分大小写的子串匹配）。
/// 集合创建后不可变，可以在任意多个工作器之间共享而无需加锁。
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    keywords: Arc<[String]>,
}

impl KeywordMatcher {
    /// 根据种子关键词创建匹配器
    ///
    /// # 参数
    ///
    /// * `seeds` - 种子关键词，空白项会被忽略
    /// * `expand` - 是否将每个种子展开为带连字符/点号的排列形式
    pub fn new<I, S>(seeds: I, expand: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut keywords = Vec::new();

        for seed in seeds {
            let seed = seed.as_ref().trim();
            // An empty pattern would match every domain
            if seed.is_empty() {
                continue;
            }

            let candidates = if expand {
                permutations(seed)
            } else {
                vec![seed.to_string()]
            };

            for keyword in candidates {
                if seen.insert(keyword.clone()) {
                    keywords.push(keyword);
                }
            }
        }

        Self {
            keywords: keywords.into(),
        }
    }

    /// 判断域名是否包含任一关键词
    pub fn matches(&self, domain: &str) -> bool {
        self.keywords
            .iter()
            .any(|keyword| domain.contains(keyword.as_str()))
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }
}

/// 生成关键词的排列形式
///
/// 在关键词两侧加上连字符或点号，以便跨子域名和连字符边界进行子串匹配
pub fn permutations(keyword: &str) -> Vec<String> {
    vec![
        format!("{keyword}-"),
        format!("-{keyword}-"),
        format!("-{keyword}"),
        format!(".{keyword}."),
        format!(".{keyword}"),
        format!(".{keyword}-"),
        format!("-{keyword}."),
    ]
}

/// 从文件读取种子关键词，每行一个
///
/// 文件不存在属于启动错误，由调用方终止进程
pub async fn load_seeds(path: impl AsRef<Path>) -> std::io::Result<Vec<String>> {
    let content = tokio::fs::read_to_string(path).await?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}
