//! Proxy address parsing.
//!
//! Covers:
//! - Accepted address forms
//! - Basic credentials and their encoding
//! - Rejection of unsupported schemes

use birdnet::socket::proxy::ProxySettings;
use birdnet::NetError;

#[test]
fn test_parse_with_auth() {
    let proxy = ProxySettings::parse("user:pass@proxy.example.com:8080").unwrap();

    assert!(proxy.requires_auth());
    assert_eq!(
        proxy.get_auth_header().as_ref().map(|h| h.as_str()),
        Some("Basic dXNlcjpwYXNz")
    );

    let (host, port) = proxy.host_port().unwrap();
    assert_eq!(host, "proxy.example.com");
    assert_eq!(port, 8080);
}

#[test]
fn test_parse_full_url() {
    let proxy = ProxySettings::parse("http://u:p@10.1.2.3:3128").unwrap();
    assert_eq!(proxy.host_port(), Some(("10.1.2.3", 3128)));
    assert_eq!(proxy.username.as_deref(), Some("u"));
}

#[test]
fn test_percent_encoded_password() {
    let proxy = ProxySettings::parse("user:p%40ss@proxy.local:8080").unwrap();
    assert_eq!(proxy.password.as_ref().map(|p| p.as_str()), Some("p@ss"));
}

#[test]
fn test_with_auth_overrides() {
    let proxy = ProxySettings::parse("proxy.local:8080")
        .unwrap()
        .with_auth("a", "b");
    assert!(proxy.requires_auth());
    assert_eq!(
        proxy.get_auth_header().as_ref().map(|h| h.as_str()),
        Some("Basic YTpi")
    );
}

#[test]
fn test_rejects_unsupported_scheme() {
    assert_eq!(
        ProxySettings::parse("socks5://proxy.local:1080").unwrap_err(),
        NetError::InvalidUrl
    );
    assert_eq!(ProxySettings::parse("").unwrap_err(), NetError::InvalidUrl);
}

#[test]
fn test_debug_hides_password() {
    let proxy = ProxySettings::parse("user:hunter2@proxy.local:8080").unwrap();
    let out = format!("{:?}", proxy);
    assert!(!out.contains("hunter2"));
}
