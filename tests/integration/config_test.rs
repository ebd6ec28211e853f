use std::fs;

use tempfile::TempDir;
use upswatch::core::config::Config;

fn write_config(dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("config.json");
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_config_load_full() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"{
            "poll_interval_secs": 30,
            "ups_host": "10.0.0.5",
            "ups_port": 1161,
            "snmp_community": "ops",
            "gateway_host": "10.0.0.9",
            "gateway_port": 4001,
            "phone_numbers": "111,222 ,333"
        }"#,
    );

    let config = Config::load(Some(&path)).unwrap();
    assert_eq!(config.poll_interval_secs, 30);
    assert_eq!(config.ups_addr(), "10.0.0.5:1161");
    assert_eq!(config.snmp_community, "ops");
    assert_eq!(config.gateway_addr(), "10.0.0.9:4001");
    assert!(config.log_file.is_none());
}

#[test]
fn test_config_defaults_applied() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"{
            "ups_host": "ups.local",
            "gateway_host": "sms.local",
            "gateway_port": 4001,
            "phone_numbers": "555"
        }"#,
    );

    let config = Config::load(Some(&path)).unwrap();
    assert_eq!(config.poll_interval_secs, 60);
    assert_eq!(config.ups_port, 161);
    assert_eq!(config.snmp_community, "public");
}

#[test]
fn test_recipients_keep_order_and_whitespace() {
    let config = Config {
        phone_numbers: "111,222 ,333".to_string(),
        ..Default::default()
    };

    // Entries are not trimmed here; the wire layer trims at send time
    assert_eq!(config.recipients(), vec!["111", "222 ", "333"]);
}

#[test]
fn test_recipients_skip_empty_entries() {
    let config = Config {
        phone_numbers: "111,, ,222".to_string(),
        ..Default::default()
    };

    assert_eq!(config.recipients(), vec!["111", "222"]);
}

#[test]
fn test_config_rejects_zero_interval() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"{
            "poll_interval_secs": 0,
            "ups_host": "ups.local",
            "gateway_host": "sms.local",
            "gateway_port": 4001,
            "phone_numbers": "555"
        }"#,
    );

    assert!(Config::load(Some(&path)).is_err());
}

#[test]
fn test_config_load_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("does-not-exist.json");
    assert!(Config::load(Some(&path)).is_err());
}
