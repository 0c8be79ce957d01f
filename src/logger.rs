// src/logger.rs

use chrono::{SecondsFormat, Utc};
use colored::Colorize;

fn stamp() -> String {
    format!("[{}]", Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true))
}

pub fn info(message: &str) {
    println!("{} {}", stamp().dimmed(), message.cyan());
}

pub fn success(message: &str) {
    println!("{} {}", stamp().dimmed(), message.green());
}

pub fn warn(message: &str) {
    eprintln!("{} {}", stamp().dimmed(), message.yellow());
}

pub fn error(message: &str) {
    eprintln!("{} {}", stamp().dimmed(), message.red());
}

pub fn banner() {
    let lines = [
        "╔══════════════════════════════════════════════╗",
        "║              Gateway Keeper                  ║",
        "║    node registration & keep-alive tool       ║",
        "╚══════════════════════════════════════════════╝",
    ];
    for line in lines {
        println!("{}", line.yellow().bold());
    }
    println!();
}
