// src/lifecycle.rs

use std::time::Duration;

use reqwest::Client;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;

use crate::api;
use crate::config::NodeRecord;
use crate::constants::{IP_SERVICES, PING_INTERVAL_SECS, REGISTRATION_RETRY_SECS};
use crate::error::KeeperError;
use crate::ip;
use crate::logger;

/// Timing knobs for a node's lifecycle, injectable for tests.
#[derive(Debug, Clone)]
pub struct LifecycleOptions {
    pub retry_delay: Duration,
    pub ping_interval: Duration,
    pub ip_services: Vec<String>,
}

impl Default for LifecycleOptions {
    fn default() -> Self {
        Self {
            retry_delay: Duration::from_secs(REGISTRATION_RETRY_SECS),
            ping_interval: Duration::from_secs(PING_INTERVAL_SECS),
            ip_services: IP_SERVICES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Signals every lifecycle task holding the paired [`StopSignal`] to exit.
/// Unused during normal runs; the process lifetime is the stop mechanism.
#[derive(Debug)]
pub struct StopHandle(watch::Sender<bool>);

pub type StopSignal = watch::Receiver<bool>;

impl StopHandle {
    pub fn stop(&self) {
        let _ = self.0.send(true);
    }
}

pub fn stop_channel() -> (StopHandle, StopSignal) {
    let (tx, rx) = watch::channel(false);
    (StopHandle(tx), rx)
}

/// Drives one node: register and start-session as an atomic pair, retried
/// indefinitely on a fixed delay, then an unbounded keep-alive ping loop.
///
/// Registration attempts are strictly sequential per node, and a ping failure
/// never breaks the loop. Every failure is retried or logged rather than
/// escalated, so this returns only when the stop signal fires.
pub async fn run_node_lifecycle(
    client: &Client,
    gateway_url: &str,
    node: &NodeRecord,
    token: &str,
    opts: &LifecycleOptions,
    mut stop: StopSignal,
) {
    loop {
        match establish(client, gateway_url, node, token, opts).await {
            Ok(()) => break,
            Err(e) => {
                logger::warn(&format!(
                    "node {}: {} - retrying in {}s",
                    node.node_id,
                    e,
                    opts.retry_delay.as_secs_f64()
                ));
                tokio::select! {
                    _ = tokio::time::sleep(opts.retry_delay) => {}
                    _ = stop.changed() => return,
                }
            }
        }
    }

    logger::success(&format!(
        "node {}: session started, pinging every {}s",
        node.node_id,
        opts.ping_interval.as_secs_f64()
    ));

    let mut ticker = tokio::time::interval(opts.ping_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // Skip the immediate first tick; the first ping comes one interval after
    // the session starts.
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match api::ping_node(client, gateway_url, &node.node_id, token).await {
                    Ok(_) => logger::info(&format!("node {}: ping acknowledged", node.node_id)),
                    Err(e) => logger::warn(&format!("node {}: {}", node.node_id, e)),
                }
            }
            _ = stop.changed() => return,
        }
    }
}

/// Resolve IP, register, start session. Any failure aborts the whole attempt
/// so the caller retries the pair from the beginning.
async fn establish(
    client: &Client,
    gateway_url: &str,
    node: &NodeRecord,
    token: &str,
    opts: &LifecycleOptions,
) -> Result<(), KeeperError> {
    let ip = ip::resolve_public_ip_with(client, &opts.ip_services).await?;

    logger::info(&format!(
        "node {}: registering hardware {} from {}",
        node.node_id, node.hardware_id, ip
    ));
    api::register_node(client, gateway_url, &node.node_id, &node.hardware_id, &ip, token).await?;
    api::start_session(client, gateway_url, &node.node_id, token).await?;
    Ok(())
}
