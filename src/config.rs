// src/config.rs

use std::fs;
use std::path::Path;

use crate::error::KeeperError;

/// One configured node, loaded from the id file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeRecord {
    pub node_id: String,
    pub hardware_id: String,
    pub proxy: Option<String>,
}

fn read_file(path: &Path) -> Result<String, KeeperError> {
    fs::read_to_string(path).map_err(|e| KeeperError::ConfigRead {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Reads `nodeId:hardwareId` lines. Blank lines are ignored; a non-blank line
/// without both parts is a fatal configuration error.
pub fn load_node_records(path: &Path) -> Result<Vec<NodeRecord>, KeeperError> {
    let data = read_file(path)?;

    let mut records = Vec::new();
    for (idx, raw) in data.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let (node_id, hardware_id) = line.split_once(':').ok_or(KeeperError::MalformedNodeLine {
            path: path.to_path_buf(),
            line: idx + 1,
        })?;
        let (node_id, hardware_id) = (node_id.trim(), hardware_id.trim());
        if node_id.is_empty() || hardware_id.is_empty() {
            return Err(KeeperError::MalformedNodeLine {
                path: path.to_path_buf(),
                line: idx + 1,
            });
        }
        records.push(NodeRecord {
            node_id: node_id.to_string(),
            hardware_id: hardware_id.to_string(),
            proxy: None,
        });
    }
    Ok(records)
}

/// Reads the bearer token file, trimmed of surrounding whitespace.
pub fn load_auth_token(path: &Path) -> Result<String, KeeperError> {
    Ok(read_file(path)?.trim().to_string())
}

/// Reads one proxy URI per non-blank line.
pub fn load_proxy_list(path: &Path) -> Result<Vec<String>, KeeperError> {
    let data = read_file(path)?;
    Ok(data
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Pairs proxies with nodes positionally. The counts must match exactly.
pub fn attach_proxies(nodes: &mut [NodeRecord], proxies: &[String]) -> Result<(), KeeperError> {
    if nodes.len() != proxies.len() {
        return Err(KeeperError::ProxyCountMismatch {
            proxies: proxies.len(),
            nodes: nodes.len(),
        });
    }
    for (node, proxy) in nodes.iter_mut().zip(proxies) {
        node.proxy = Some(proxy.clone());
    }
    Ok(())
}
