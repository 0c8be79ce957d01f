// src/error.rs

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum KeeperError {
    #[error("could not read {path}: {source}")]
    ConfigRead { path: PathBuf, source: io::Error },

    #[error("{path}:{line}: expected 'nodeId:hardwareId'")]
    MalformedNodeLine { path: PathBuf, line: usize },

    #[error("proxy list has {proxies} entries but {nodes} nodes are configured")]
    ProxyCountMismatch { proxies: usize, nodes: usize },

    #[error("invalid proxy '{uri}': {reason}")]
    InvalidProxy { uri: String, reason: String },

    #[error("could not build HTTP client: {0}")]
    HttpClient(String),

    #[error("prompt failed: {0}")]
    Prompt(io::Error),

    #[error("all {attempted} public IP services are unreachable")]
    AllIpServicesUnavailable { attempted: usize },

    #[error("registration failed for node {node_id}: {reason}")]
    Registration { node_id: String, reason: String },

    #[error("session start failed for node {node_id}: {reason}")]
    Session { node_id: String, reason: String },

    #[error("ping failed for node {node_id}: {reason}")]
    Ping { node_id: String, reason: String },

    #[error("node task aborted: {0}")]
    TaskFault(String),

    #[error("could not write report {path}: {source}")]
    Report { path: PathBuf, source: io::Error },
}

impl KeeperError {
    /// Faults that must halt the run instead of triggering a fleet restart.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            KeeperError::ConfigRead { .. }
                | KeeperError::MalformedNodeLine { .. }
                | KeeperError::ProxyCountMismatch { .. }
                | KeeperError::InvalidProxy { .. }
                | KeeperError::HttpClient(_)
                | KeeperError::Prompt(_)
        )
    }
}
