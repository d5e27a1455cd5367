// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs::{self, File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::domain::models::finding::Finding;
use crate::domain::repositories::finding_sink::{FindingSink, SinkError};

/// 本地文件命中结果输出
///
/// 以追加方式写入，每条结果一行；内部互斥保证并发写入时行不会交错
pub struct FileFindingSink {
    path: PathBuf,
    file: Mutex<File>,
}

impl FileFindingSink {
    /// 打开（必要时创建）结果文件
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, SinkError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await?;

        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl FindingSink for FileFindingSink {
    async fn append(&self, finding: &Finding) -> Result<(), SinkError> {
        let mut line = finding.log_line();
        line.push('\n');

        let mut file = self.file.lock().await;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }
}
