// tests/config.rs

use std::fs;
use std::path::PathBuf;

use gateway_keeper_lib::config::{self, NodeRecord};
use gateway_keeper_lib::error::KeeperError;
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn node_records_round_trip_ignoring_blank_lines() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "id.txt",
        "node-1:aaaa\n\nnode-2:bbbb\n   \nnode-3:cccc\n",
    );

    let records = config::load_node_records(&path).unwrap();
    assert_eq!(
        records,
        vec![
            NodeRecord { node_id: "node-1".into(), hardware_id: "aaaa".into(), proxy: None },
            NodeRecord { node_id: "node-2".into(), hardware_id: "bbbb".into(), proxy: None },
            NodeRecord { node_id: "node-3".into(), hardware_id: "cccc".into(), proxy: None },
        ]
    );
}

#[test]
fn malformed_node_line_reports_its_line_number() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "id.txt", "node-1:aaaa\nnot-a-pair\n");

    match config::load_node_records(&path) {
        Err(KeeperError::MalformedNodeLine { line, .. }) => assert_eq!(line, 2),
        other => panic!("expected MalformedNodeLine, got {other:?}"),
    }
}

#[test]
fn missing_node_file_is_a_config_read_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("does-not-exist.txt");

    assert!(matches!(
        config::load_node_records(&path),
        Err(KeeperError::ConfigRead { .. })
    ));
}

#[test]
fn auth_token_is_trimmed() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "user.txt", "  my-bearer-token\n\n");

    assert_eq!(config::load_auth_token(&path).unwrap(), "my-bearer-token");
}

#[test]
fn proxy_list_skips_blank_lines() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "proxy.txt",
        "http://proxy-a:8080\n\nsocks5://proxy-b:1080\n",
    );

    assert_eq!(
        config::load_proxy_list(&path).unwrap(),
        vec!["http://proxy-a:8080".to_string(), "socks5://proxy-b:1080".to_string()]
    );
}

#[test]
fn attach_proxies_pairs_positionally() {
    let mut nodes = vec![
        NodeRecord { node_id: "n1".into(), hardware_id: "a".into(), proxy: None },
        NodeRecord { node_id: "n2".into(), hardware_id: "b".into(), proxy: None },
    ];
    let proxies = vec!["http://p1:8080".to_string(), "http://p2:8080".to_string()];

    config::attach_proxies(&mut nodes, &proxies).unwrap();
    assert_eq!(nodes[0].proxy.as_deref(), Some("http://p1:8080"));
    assert_eq!(nodes[1].proxy.as_deref(), Some("http://p2:8080"));
}

#[test]
fn proxy_count_mismatch_is_fatal() {
    let mut nodes = vec![NodeRecord {
        node_id: "n1".into(),
        hardware_id: "a".into(),
        proxy: None,
    }];
    let proxies = vec!["http://p1:8080".to_string(), "http://p2:8080".to_string()];

    match config::attach_proxies(&mut nodes, &proxies) {
        Err(e @ KeeperError::ProxyCountMismatch { proxies: 2, nodes: 1 }) => {
            assert!(e.is_fatal());
        }
        other => panic!("expected ProxyCountMismatch, got {other:?}"),
    }
}
