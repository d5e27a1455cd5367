// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 证书事件解码测试模块
///
/// 使用接近真实事件源格式的消息验证解码和签发者过滤

#[cfg(test)]
mod tests {
    use domainwatch::domain::models::cert_event::FeedMessage;
    use domainwatch::domain::services::issuer_filter::IssuerFilter;

    const UPDATE: &str = r#"{
        "message_type": "certificate_update",
        "data": {
            "update_type": "X509LogEntry",
            "cert_index": 712345678,
            "seen": 1700000000.123,
            "source": { "name": "Example CT log", "url": "ct.example.net/log/" },
            "leaf_cert": {
                "subject": { "aggregated": "/CN=bank.example.com", "CN": "bank.example.com" },
                "issuer": { "aggregated": "/C=US/O=Let's Encrypt/CN=R3", "O": "Let's Encrypt" },
                "all_domains": ["bank.example.com", "*.bank.example.com", "bank.example.com"],
                "not_before": 1700000000,
                "not_after": 1707776000
            },
            "chain": [
                { "subject": { "aggregated": "/C=US/O=Let's Encrypt/CN=R3" } },
                { "subject": { "aggregated": "/O=Internet Security Research Group/CN=ISRG Root X1" } }
            ]
        }
    }"#;

    #[test]
    fn test_full_update_decodes_and_dedups() {
        let message: FeedMessage = serde_json::from_str(UPDATE).unwrap();
        let FeedMessage::CertificateUpdate { data } = message else {
            panic!("expected a certificate update");
        };

        let domains: Vec<&str> = data.unique_domains().into_iter().collect();
        assert_eq!(domains, vec!["*.bank.example.com", "bank.example.com"]);
        assert_eq!(data.issuer(), Some("/C=US/O=Let's Encrypt/CN=R3"));
    }

    #[test]
    fn test_lets_encrypt_update_is_skipped() {
        let message: FeedMessage = serde_json::from_str(UPDATE).unwrap();
        let FeedMessage::CertificateUpdate { data } = message else {
            panic!("expected a certificate update");
        };

        assert!(IssuerFilter::from_options(true, &[]).should_skip(&data));
        assert!(!IssuerFilter::from_options(false, &[]).should_skip(&data));
    }

    #[test]
    fn test_heartbeat_and_unknown_types() {
        let heartbeat: FeedMessage =
            serde_json::from_str(r#"{"message_type":"heartbeat","timestamp":1700000000}"#).unwrap();
        assert!(matches!(heartbeat, FeedMessage::Heartbeat));

        let other: FeedMessage =
            serde_json::from_str(r#"{"message_type":"dns_entries","data":[]}"#).unwrap();
        assert!(matches!(other, FeedMessage::Unknown));
    }
}
