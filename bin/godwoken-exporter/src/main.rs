#![deny(unused_crate_dependencies)]
#![warn(missing_docs)]
#![warn(unused_extern_crates)]
#![warn(unused_imports)]

//! A Prometheus exporter for godwoken rollup deployments.

use std::{sync::Arc, time::Duration};

use clap::Parser;
use envconfig::Envconfig;
use ethers::providers::{Http, Provider};
use eyre::Result;
use url::Url;

use api::AppState;
use client::gw_config;
use cli::Args;
use config::Config;

mod cli;
mod config;
mod logging;

fn provider(http: &reqwest::Client, url: &Url) -> Provider<Http> {
    Provider::new(Http::new_with_client(url.clone(), http.clone()))
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();

    dotenvy::dotenv().ok();
    let config = Config::init_from_env()?;

    let sentry_guard = logging::init(&config.net_env);
    if sentry_guard.is_some() {
        tracing::info!("starting sentry for environment {}", config.net_env);
    } else {
        tracing::info!("no sentry url configured");
    }

    let gw_config = if config.net_env.eq_ignore_ascii_case("mainnet") {
        gw_config::mainnet_config()
    } else {
        gw_config::testnet_config()
    };

    // One shared HTTP transport; its timeout bounds every upstream call.
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.rpc_timeout_secs))
        .build()?;

    let state = AppState {
        web3: Arc::new(provider(&http, &config.web3_url)),
        gw: Arc::new(provider(&http, &config.gw_rpc_url)),
        ckb: Arc::new(provider(&http, &config.ckb_rpc_url)),
        indexer: Arc::new(provider(&http, &config.ckb_indexer_url)),
        gw_config: Arc::new(gw_config),
        web3_url: config.web3_url.to_string(),
    };

    let listen = args.listen.unwrap_or(config.listen_addr);

    api::run_server(state, listen).await?;

    Ok(())
}
