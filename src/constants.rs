// src/constants.rs

// UserAgent String
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/100.0.0.0 Safari/537.36";

/// Default base URL for the node gateway API.
pub const DEFAULT_GATEWAY_URL: &str = "https://gateway-run.bls.dev";

/// Public IP lookup services, tried in order until one answers with `{"ip": ...}`.
pub const IP_SERVICES: [&str; 3] = [
    "https://tight-block-2413.txlabs.workers.dev",
    "https://api.ipify.org?format=json",
    "https://ipinfo.io/json",
];

// Peer-style public key shape
pub const PUBKEY_PREFIX: &str = "12D3KooW";
pub const PUBKEY_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
pub const DEFAULT_PUBKEY_LENGTH: usize = 52;

/// Delay between register/start-session retry attempts.
pub const REGISTRATION_RETRY_SECS: u64 = 5;
/// Interval between keep-alive pings once a session is up.
pub const PING_INTERVAL_SECS: u64 = 60;
/// Delay before the whole fleet is restarted after an unhandled fault.
pub const RESTART_DELAY_SECS: u64 = 15;
