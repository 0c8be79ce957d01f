// src/cli.rs

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::constants::DEFAULT_GATEWAY_URL;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate synthetic Mac hardware fingerprints and write a report file.
    Generate {
        /// Number of devices to generate.
        #[arg(default_value_t = 1)]
        count: u32,

        /// Report file, one formatted block per device.
        #[arg(long, default_value = "mac_devices.txt")]
        output: PathBuf,
    },

    /// Register every configured node and keep its session alive.
    Run {
        /// Base URL of the node gateway API.
        #[arg(long, default_value = DEFAULT_GATEWAY_URL)]
        api_url: String,

        /// File of `nodeId:hardwareId` lines, one per node.
        #[arg(long, default_value = "id.txt")]
        id_file: PathBuf,

        /// File holding the bearer token.
        #[arg(long, default_value = "user.txt")]
        token_file: PathBuf,

        /// File of proxy URIs, positionally aligned with the id file.
        #[arg(long, default_value = "proxy.txt")]
        proxy_file: PathBuf,

        /// Route traffic through the proxy list without asking.
        #[arg(long)]
        proxy: bool,

        /// Connect directly without asking.
        #[arg(long, conflicts_with = "proxy")]
        no_proxy: bool,
    },

    /// Run a local mock of the gateway API for manual testing.
    MockGateway {
        #[arg(long, default_value_t = 8787)]
        port: u16,

        /// Bearer token the mock accepts.
        #[arg(long, default_value = "test-token")]
        token: String,

        /// Address the mock's IP-lookup endpoint reports.
        #[arg(long, default_value = "203.0.113.5")]
        public_ip: String,
    },
}
