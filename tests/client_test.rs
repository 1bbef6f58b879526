//! Client construction and signing tests against the public API.

use std::time::Duration;

use passgate_sdk::prelude::*;
use serde_json::json;

#[test]
fn client_initialization() {
    let client = Passgate::new("test_account", "test_secret");
    assert!(client.is_ok());
}

#[test]
fn client_with_custom_config() {
    let config = PassgateConfig::new("account", "secret")
        .with_base_url("https://api.test.passgate.io")
        .with_timeout(Duration::from_secs(45));

    let client = Passgate::with_config(config);
    assert!(client.is_ok());
}

#[test]
fn client_validation_rejects_empty_credentials() {
    assert!(Passgate::new("", "secret").is_err());
    assert!(Passgate::new("account", "").is_err());
}

#[test]
fn config_defaults() {
    let config = PassgateConfig::new("account", "secret");
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert!(config.user_agent.starts_with("passgate-sdk/"));
}

#[test]
fn signing_is_stable_across_calls() {
    let payload = json!({ "id": "test" });
    let encoded = encode_payload(&payload).unwrap();
    let signature = create_signature("test-secret", &encoded);

    assert_eq!(
        signature,
        "ac5af7ff986c1f1fa24b117181fde0889d5c90d31a13744c0e6caed2b3cbe32d"
    );
    assert!(verify_signature("test-secret", &encoded, &signature));
}

#[test]
fn write_and_read_headers_agree_on_default_payload() {
    let write_headers = create_auth_headers("acct", "secret", None).unwrap();
    let (read_headers, encoded) = create_get_auth_headers("acct", "secret", None).unwrap();

    assert_eq!(
        write_headers["X-PAYLOAD-SIG"],
        read_headers["X-PAYLOAD-SIG"]
    );
    assert_eq!(encoded, "eyJpZCI6IjAifQ==");
}
