// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use futures::{future, StreamExt};
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::debug;
use url::Url;

use crate::domain::models::cert_event::FeedMessage;
use crate::domain::repositories::certificate_feed::{CertificateFeed, FeedError, FeedStream};

/// Certstream 事件源
///
/// 通过 websocket 订阅证书透明度事件流，每帧为一条JSON消息
pub struct CertStreamFeed {
    url: Url,
}

impl CertStreamFeed {
    /// 创建事件源
    ///
    /// 地址必须是 `ws` 或 `wss` 协议
    pub fn new(url: &str) -> Result<Self, FeedError> {
        let url = Url::parse(url).map_err(|e| FeedError::Connect(format!("{url}: {e}")))?;
        match url.scheme() {
            "ws" | "wss" => Ok(Self { url }),
            scheme => Err(FeedError::Connect(format!(
                "unsupported scheme '{scheme}', expected ws or wss"
            ))),
        }
    }
}

#[async_trait]
impl CertificateFeed for CertStreamFeed {
    async fn connect(&self) -> Result<FeedStream, FeedError> {
        let (ws_stream, _) = connect_async(self.url.as_str())
            .await
            .map_err(|e| FeedError::Connect(e.to_string()))?;

        let stream = ws_stream
            .take_while(|frame| future::ready(!matches!(frame, Ok(Message::Close(_)))))
            .filter_map(|frame| {
                future::ready(match frame {
                    Ok(Message::Text(text)) => decode_frame(text.as_bytes()),
                    Ok(Message::Binary(bytes)) => decode_frame(&bytes),
                    // Pings are answered by the transport itself
                    Ok(_) => None,
                    Err(e) => Some(Err(FeedError::Transport(e.to_string()))),
                })
            });

        Ok(stream.boxed())
    }

    fn describe(&self) -> String {
        self.url.to_string()
    }
}

/// 解码单帧消息
///
/// 无法解码的帧直接丢弃，不影响连接
fn decode_frame(payload: &[u8]) -> Option<Result<FeedMessage, FeedError>> {
    match serde_json::from_slice::<FeedMessage>(payload) {
        Ok(message) => Some(Ok(message)),
        Err(e) => {
            debug!("Skipping undecodable feed frame: {}", FeedError::Decode(e.to_string()));
            None
        }
    }
}
