// tests/fingerprint.rs

use gateway_keeper_lib::constants::{DEFAULT_PUBKEY_LENGTH, PUBKEY_PREFIX};
use gateway_keeper_lib::fingerprint::{
    self, CPU_TYPES, HardwareProfile, MAC_MODELS, MACOS_VERSIONS, RETINA_RESOLUTIONS,
    SCREEN_RESOLUTIONS,
};

fn sample_profile() -> HardwareProfile {
    HardwareProfile {
        model: "MacBookPro15,1".to_string(),
        mac_os: "macOS 13.0 Ventura".to_string(),
        cpu: "Apple M2".to_string(),
        memory: "16GB".to_string(),
        storage: "512GB".to_string(),
        resolution: "2880x1800".to_string(),
        battery: "73%".to_string(),
        retina: true,
    }
}

#[test]
fn retina_iff_high_density_resolution() {
    for _ in 0..200 {
        let profile = fingerprint::generate_profile();
        assert!(SCREEN_RESOLUTIONS.contains(&profile.resolution.as_str()));
        assert_eq!(
            profile.retina,
            RETINA_RESOLUTIONS.contains(&profile.resolution.as_str()),
            "retina flag disagrees with resolution {}",
            profile.resolution
        );
    }
}

#[test]
fn generated_values_come_from_fixed_option_sets() {
    for _ in 0..100 {
        let profile = fingerprint::generate_profile();
        assert!(MAC_MODELS.contains(&profile.model.as_str()));
        assert!(MACOS_VERSIONS.contains(&profile.mac_os.as_str()));
        assert!(CPU_TYPES.contains(&profile.cpu.as_str()));
        assert!(profile.memory.ends_with("GB"));
        assert!(profile.storage.ends_with("GB"));

        let battery: u32 = profile
            .battery
            .strip_suffix('%')
            .expect("battery should end with %")
            .parse()
            .expect("battery should be numeric");
        assert!(battery < 100);
    }
}

#[test]
fn hardware_id_is_deterministic() {
    let a = sample_profile();
    let b = sample_profile();
    assert_eq!(
        fingerprint::compute_hardware_id(&a),
        fingerprint::compute_hardware_id(&b)
    );
}

#[test]
fn hardware_id_is_64_lowercase_hex_chars() {
    let id = fingerprint::compute_hardware_id(&sample_profile());
    assert_eq!(id.len(), 64);
    assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
}

#[test]
fn changing_any_field_changes_the_hash() {
    let base = sample_profile();
    let base_id = fingerprint::compute_hardware_id(&base);

    let variants = [
        HardwareProfile { model: "iMac20,1".into(), ..base.clone() },
        HardwareProfile { mac_os: "macOS 12.6 Monterey".into(), ..base.clone() },
        HardwareProfile { cpu: "Intel Core i9".into(), ..base.clone() },
        HardwareProfile { memory: "64GB".into(), ..base.clone() },
        HardwareProfile { storage: "2048GB".into(), ..base.clone() },
        HardwareProfile { resolution: "3072x1920".into(), retina: false, ..base.clone() },
        HardwareProfile { battery: "74%".into(), ..base.clone() },
        HardwareProfile { retina: false, ..base.clone() },
    ];
    for variant in variants {
        assert_ne!(
            fingerprint::compute_hardware_id(&variant),
            base_id,
            "hash did not change for {variant:?}"
        );
    }
}

#[test]
fn canonical_serialization_preserves_field_order() {
    let json = serde_json::to_string(&sample_profile()).unwrap();
    let keys = [
        "\"model\"",
        "\"macOS\"",
        "\"cpu\"",
        "\"memory\"",
        "\"storage\"",
        "\"resolution\"",
        "\"battery\"",
        "\"retina\"",
    ];
    let positions: Vec<usize> = keys
        .iter()
        .map(|k| json.find(k).unwrap_or_else(|| panic!("missing key {k}")))
        .collect();
    assert!(
        positions.windows(2).all(|w| w[0] < w[1]),
        "canonical key order changed: {json}"
    );
}

#[test]
fn pub_key_has_fixed_prefix_length_and_charset() {
    for length in [DEFAULT_PUBKEY_LENGTH, 20, 8] {
        let key = fingerprint::generate_pub_key(length);
        assert_eq!(key.len(), length);
        assert!(key.starts_with(PUBKEY_PREFIX));
        assert!(
            key[PUBKEY_PREFIX.len()..]
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()),
            "unexpected character in {key}"
        );
    }
}

#[test]
fn generated_device_binds_hash_to_its_profile() {
    let device = fingerprint::generate_device();
    assert_eq!(
        device.hardware_id,
        fingerprint::compute_hardware_id(&device.profile)
    );
    assert_eq!(device.public_key.len(), DEFAULT_PUBKEY_LENGTH);

    // The report record carries the profile fields plus the derived ids.
    let json = serde_json::to_string(&device).unwrap();
    assert!(json.contains("\"publicKey\""));
    assert!(json.contains("\"hardwareID\""));
    assert!(json.contains("\"model\""));
}
