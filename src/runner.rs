// src/runner.rs

use std::future::Future;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use tokio::task::JoinSet;

use crate::api;
use crate::config;
use crate::constants::RESTART_DELAY_SECS;
use crate::error::KeeperError;
use crate::lifecycle::{self, LifecycleOptions};
use crate::logger;

/// Explicit run configuration, threaded by parameter into every task.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub gateway_url: String,
    pub id_file: PathBuf,
    pub token_file: PathBuf,
    pub proxy_file: PathBuf,
    /// `None` asks interactively, once, before the supervision loop starts.
    pub use_proxy: Option<bool>,
    pub lifecycle: LifecycleOptions,
    pub restart_delay: Duration,
}

impl RunConfig {
    pub fn new(gateway_url: String, id_file: PathBuf, token_file: PathBuf, proxy_file: PathBuf) -> Self {
        Self {
            gateway_url,
            id_file,
            token_file,
            proxy_file,
            use_proxy: None,
            lifecycle: LifecycleOptions::default(),
            restart_delay: Duration::from_secs(RESTART_DELAY_SECS),
        }
    }
}

/// Resolves the proxy question once, then supervises the fleet. Restarts are
/// non-interactive; the prompt never runs again after the first pass.
pub async fn run(cfg: &RunConfig) -> Result<(), KeeperError> {
    let use_proxy = match cfg.use_proxy {
        Some(answer) => answer,
        None => prompt_yes_no(
            "Route node traffic through the proxy list?",
            &mut io::stdin().lock(),
        )?,
    };

    supervise(cfg.restart_delay, || run_fleet(cfg, use_proxy)).await
}

/// Supervision loop: fatal configuration errors propagate, anything else
/// logs and reruns the fleet after a delay (re-registering every node).
pub async fn supervise<F, Fut>(restart_delay: Duration, mut fleet: F) -> Result<(), KeeperError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<(), KeeperError>>,
{
    loop {
        match fleet().await {
            Ok(()) => return Ok(()),
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                logger::error(&format!(
                    "run failed: {e} - restarting fleet in {}s",
                    restart_delay.as_secs_f64()
                ));
                tokio::time::sleep(restart_delay).await;
            }
        }
    }
}

/// One full fleet pass: load configuration, fan out one lifecycle task per
/// node, and wait on all of them. Tasks share only read-only configuration.
async fn run_fleet(cfg: &RunConfig, use_proxy: bool) -> Result<(), KeeperError> {
    let token = config::load_auth_token(&cfg.token_file)?;
    let mut nodes = config::load_node_records(&cfg.id_file)?;
    logger::info(&format!("loaded {} node configurations", nodes.len()));

    if use_proxy {
        let proxies = match config::load_proxy_list(&cfg.proxy_file) {
            Ok(list) => list,
            Err(e) => {
                logger::warn(&format!("{e} - continuing with an empty proxy list"));
                Vec::new()
            }
        };
        config::attach_proxies(&mut nodes, &proxies)?;
        logger::info(&format!("proxy mode enabled for {} nodes", nodes.len()));
    }

    let shared_client = api::build_client(None)?;
    let (stop_handle, stop_signal) = lifecycle::stop_channel();

    let mut tasks = JoinSet::new();
    for node in nodes {
        let client = match node.proxy.as_deref() {
            Some(proxy) => api::build_client(Some(proxy))?,
            None => shared_client.clone(),
        };
        let gateway_url = cfg.gateway_url.clone();
        let token = token.clone();
        let opts = cfg.lifecycle.clone();
        let stop = stop_signal.clone();

        tasks.spawn(async move {
            // The lifecycle retries and logs its own failures; it only
            // returns once the stop signal fires, so one node can never
            // take down its siblings.
            lifecycle::run_node_lifecycle(&client, &gateway_url, &node, &token, &opts, stop).await;
        });
    }
    drop(stop_signal);

    while let Some(joined) = tasks.join_next().await {
        if let Err(e) = joined {
            stop_handle.stop();
            return Err(KeeperError::TaskFault(e.to_string()));
        }
    }
    Ok(())
}

/// Asks a yes/no question on stdout and reads one answer line.
pub fn prompt_yes_no(question: &str, input: &mut impl BufRead) -> Result<bool, KeeperError> {
    print!("{question} [y/N]: ");
    io::stdout().flush().map_err(KeeperError::Prompt)?;

    let mut answer = String::new();
    input.read_line(&mut answer).map_err(KeeperError::Prompt)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}
