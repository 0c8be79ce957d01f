// src/report.rs

use std::fs;
use std::path::Path;

use indicatif::ProgressBar;

use crate::error::KeeperError;
use crate::fingerprint;
use crate::logger;

/// Generates `count` synthetic devices and writes one human-readable block
/// per device to the report file.
pub fn run_generate(count: u32, output: &Path) -> Result<(), KeeperError> {
    logger::info(&format!("generating {count} synthetic Mac devices"));

    let bar = ProgressBar::new(count as u64);
    let mut report = String::new();
    for index in 0..count {
        let device = fingerprint::generate_device();
        let block = serde_json::to_string_pretty(&device)
            .expect("GeneratedDevice always serializes to JSON");
        report.push_str(&format!("Device {}:\n{}\n\n", index + 1, block));
        bar.inc(1);
    }
    bar.finish_and_clear();

    fs::write(output, report).map_err(|e| KeeperError::Report {
        path: output.to_path_buf(),
        source: e,
    })?;

    logger::success(&format!(
        "saved {} device profiles to {}",
        count,
        output.display()
    ));
    Ok(())
}
