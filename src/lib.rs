// src/lib.rs

pub mod api;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod fingerprint;
pub mod ip;
pub mod lifecycle;
pub mod logger;
pub mod mock_gateway;
pub mod report;
pub mod runner;
