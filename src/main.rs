// src/main.rs

use clap::Parser;
use gateway_keeper_lib::cli::{Cli, Commands};
use gateway_keeper_lib::runner::{self, RunConfig};
use gateway_keeper_lib::{logger, mock_gateway, report};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logger::banner();

    let result = match cli.command {
        Commands::Generate { count, output } => report::run_generate(count, &output),
        Commands::Run {
            api_url,
            id_file,
            token_file,
            proxy_file,
            proxy,
            no_proxy,
        } => {
            let mut cfg = RunConfig::new(api_url, id_file, token_file, proxy_file);
            cfg.use_proxy = if proxy {
                Some(true)
            } else if no_proxy {
                Some(false)
            } else {
                None
            };
            runner::run(&cfg).await
        }
        Commands::MockGateway {
            port,
            token,
            public_ip,
        } => {
            mock_gateway::serve(port, token, public_ip).await;
            Ok(())
        }
    };

    if let Err(e) = result {
        logger::error(&format!("fatal: {e}"));
        std::process::exit(1);
    }
}
