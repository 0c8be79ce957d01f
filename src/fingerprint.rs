// src/fingerprint.rs

use rand::Rng;
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::constants::{PUBKEY_CHARSET, PUBKEY_PREFIX};

// Fixed option sets for synthetic Mac hardware.
pub const MAC_MODELS: [&str; 5] = [
    "MacBookPro15,1",
    "MacBookAir10,1",
    "MacMini9,1",
    "iMac20,1",
    "MacPro7,1",
];
pub const MACOS_VERSIONS: [&str; 3] = [
    "macOS 12.6 Monterey",
    "macOS 13.0 Ventura",
    "macOS 11.7 Big Sur",
];
pub const CPU_TYPES: [&str; 5] = [
    "Apple M1",
    "Apple M2",
    "Intel Core i5",
    "Intel Core i7",
    "Intel Core i9",
];
pub const MEMORY_OPTIONS: [u32; 4] = [8, 16, 32, 64];
pub const STORAGE_OPTIONS: [u32; 4] = [256, 512, 1024, 2048];
pub const SCREEN_RESOLUTIONS: [&str; 3] = ["2560x1600", "2880x1800", "3072x1920"];
/// High-density panels; `retina` is true iff the resolution is one of these.
pub const RETINA_RESOLUTIONS: [&str; 2] = ["2560x1600", "2880x1800"];

/// One synthetic hardware fingerprint. The serde field order below is the
/// canonical hash order; reordering fields changes every derived hardware ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HardwareProfile {
    pub model: String,
    #[serde(rename = "macOS")]
    pub mac_os: String,
    pub cpu: String,
    pub memory: String,
    pub storage: String,
    pub resolution: String,
    pub battery: String,
    pub retina: bool,
}

/// A profile together with its derived identifiers, as written to the report.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedDevice {
    #[serde(flatten)]
    pub profile: HardwareProfile,
    #[serde(rename = "publicKey")]
    pub public_key: String,
    #[serde(rename = "hardwareID")]
    pub hardware_id: String,
}

/// Uniformly samples one value from each option set.
pub fn generate_profile() -> HardwareProfile {
    let mut rng = rand::thread_rng();

    let resolution = SCREEN_RESOLUTIONS[rng.gen_range(0..SCREEN_RESOLUTIONS.len())];
    HardwareProfile {
        model: MAC_MODELS[rng.gen_range(0..MAC_MODELS.len())].to_string(),
        mac_os: MACOS_VERSIONS[rng.gen_range(0..MACOS_VERSIONS.len())].to_string(),
        cpu: CPU_TYPES[rng.gen_range(0..CPU_TYPES.len())].to_string(),
        memory: format!("{}GB", MEMORY_OPTIONS[rng.gen_range(0..MEMORY_OPTIONS.len())]),
        storage: format!("{}GB", STORAGE_OPTIONS[rng.gen_range(0..STORAGE_OPTIONS.len())]),
        resolution: resolution.to_string(),
        battery: format!("{}%", rng.gen_range(0..100)),
        retina: RETINA_RESOLUTIONS.contains(&resolution),
    }
}

/// SHA-256 over the canonical JSON serialization, hex-encoded (64 chars).
pub fn compute_hardware_id(profile: &HardwareProfile) -> String {
    let canonical =
        serde_json::to_string(profile).expect("HardwareProfile always serializes to JSON");
    hex::encode(Sha256::digest(canonical.as_bytes()))
}

/// Peer-style public key: fixed prefix, then uppercase alphanumerics up to
/// `length` total characters.
pub fn generate_pub_key(length: usize) -> String {
    let mut rng = rand::thread_rng();
    let remaining = length.saturating_sub(PUBKEY_PREFIX.len());

    let mut key = String::with_capacity(length);
    key.push_str(PUBKEY_PREFIX);
    for _ in 0..remaining {
        key.push(PUBKEY_CHARSET[rng.gen_range(0..PUBKEY_CHARSET.len())] as char);
    }
    key
}

/// A fresh profile with its public key and content hash attached.
pub fn generate_device() -> GeneratedDevice {
    let profile = generate_profile();
    let hardware_id = compute_hardware_id(&profile);
    GeneratedDevice {
        profile,
        public_key: generate_pub_key(crate::constants::DEFAULT_PUBKEY_LENGTH),
        hardware_id,
    }
}
