#![deny(unused_crate_dependencies)]
#![warn(missing_docs)]
#![warn(unused_extern_crates)]
#![warn(unused_imports)]

//! The HTTP surface of the exporter: one route, `GET /metrics/godwoken`,
//! answering every request with a fresh scrape of the upstream services
//! rendered in the Prometheus text exposition format.
//!
//! A failed collector never fails the request. Each metric group is
//! gathered independently; on failure it is logged and either omitted or
//! published as the `-1` sentinel, and the response is `200` regardless.

mod metrics;

pub use metrics::ScrapeMetrics;

// Dev-dependencies of the integration tests under `tests/`.
#[cfg(test)]
use {ethers as _, serde_json as _, tower as _};

use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use prometheus::{Encoder, Registry, TextEncoder};

use client::{
    gw_config::{GwConfig, LockKind},
    CkbIndexerRpc, CkbRpc, GodwokenRpc, GodwokenWeb3Rpc,
};
use collector::BlockInfo;

/// The godwoken web3 endpoint as a shared trait object.
pub type DynGodwokenWeb3Rpc = Arc<dyn GodwokenWeb3Rpc + Send + Sync>;
/// The godwoken full node as a shared trait object.
pub type DynGodwokenRpc = Arc<dyn GodwokenRpc + Send + Sync>;
/// The CKB node as a shared trait object.
pub type DynCkbRpc = Arc<dyn CkbRpc + Send + Sync>;
/// The CKB indexer as a shared trait object.
pub type DynCkbIndexerRpc = Arc<dyn CkbIndexerRpc + Send + Sync>;

/// Everything a scrape needs, constructed once at startup.
#[derive(Clone)]
pub struct AppState {
    /// Godwoken web3 endpoint client.
    pub web3: DynGodwokenWeb3Rpc,
    /// Godwoken full node client.
    pub gw: DynGodwokenRpc,
    /// CKB node client.
    pub ckb: DynCkbRpc,
    /// CKB indexer client.
    pub indexer: DynCkbIndexerRpc,
    /// Script-hash table of the scraped deployment.
    pub gw_config: Arc<GwConfig>,
    /// The configured web3 URL, used as the `web3_url` label value.
    pub web3_url: String,
}

/// The exporter's router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/metrics/godwoken", get(serve_metrics))
        .with_state(state)
}

/// Serve the exporter on `addr` until the process stops.
pub async fn run_server(state: AppState, addr: SocketAddr) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("serving metrics on http://{addr}/metrics/godwoken");

    axum::serve(listener, router(state)).await
}

async fn serve_metrics(State(state): State<AppState>) -> impl IntoResponse {
    let body = scrape(&state).await;

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        body,
    )
}

/// One full pass through the collectors, in fixed order, into a fresh
/// registry.
async fn scrape(state: &AppState) -> String {
    let registry = Registry::new();
    let metrics = match ScrapeMetrics::register(&registry) {
        Ok(metrics) => metrics,
        Err(err) => {
            tracing::error!(%err, "cannot register scrape metrics");
            return String::new();
        }
    };

    let url = state.web3_url.as_str();
    let block_info = BlockInfo::new(state.web3.clone());

    match block_info.last_block_height().await {
        Ok(height) => {
            metrics
                .last_block_number
                .with_label_values(&[url])
                .set(height as f64);
        }
        Err(err) => tracing::warn!(%err, "last block height unavailable"),
    }

    match state.web3.gw_ping().await {
        Ok(reply) => {
            metrics
                .gw_ping
                .with_label_values(&[url, reply.as_str()])
                .set(1.0);
        }
        Err(err) => tracing::warn!(%err, "gw_ping unavailable"),
    }

    match state.web3.client_version().await {
        Ok(version) => {
            metrics
                .client_version
                .with_label_values(&[url, version.as_str()])
                .set(1.0);
        }
        Err(err) => tracing::warn!(%err, "client version unavailable"),
    }

    // The tip hash anchors both the block-info walk and the lock stats;
    // it is fetched once per scrape.
    let tip_hash = match state.web3.tip_block_hash().await {
        Ok(hash) => Some(hash),
        Err(err) => {
            tracing::warn!(%err, "tip block hash unavailable");
            None
        }
    };

    if let Some(hash) = tip_hash {
        match block_info.tip_stats(hash).await {
            Ok(stats) => {
                metrics
                    .last_block_info
                    .with_label_values(&[
                        url,
                        &format!("{:#x}", stats.hash),
                        &stats.number.to_string(),
                        &stats.timestamp.to_string(),
                    ])
                    .set(stats.time_difference as f64);
                metrics
                    .block_transactions
                    .with_label_values(&[url])
                    .set(stats.commit_transactions as f64);
                metrics
                    .block_time_difference
                    .with_label_values(&[url])
                    .set(stats.time_difference as f64);
            }
            Err(err) => tracing::warn!(%err, "tip block stats unavailable"),
        }
    }

    match collector::sum_custodian_capacity(&state.indexer, &state.gw_config).await {
        Ok(capacity) => {
            metrics
                .custodian_capacity
                .with_label_values(&[url])
                .set(capacity as f64);
        }
        Err(err) => {
            tracing::warn!(%err, "custodian capacity unavailable");
            metrics
                .custodian_capacity
                .with_label_values(&[url])
                .set(-1.0);
        }
    }

    let lock_groups = [
        (
            LockKind::Deposit,
            &metrics.deposit_count,
            &metrics.deposit_capacity,
        ),
        (
            LockKind::Withdrawal,
            &metrics.withdrawal_count,
            &metrics.withdrawal_capacity,
        ),
    ];

    for (kind, count_gauge, capacity_gauge) in lock_groups {
        let stat = match tip_hash {
            Some(hash) => {
                collector::stat_by_lock(&state.gw, &state.ckb, &state.gw_config, kind, hash).await
            }
            None => Err(client::Error::unexpected(
                "gw_get_tip_block_hash",
                "no tip block hash this scrape",
            )
            .into()),
        };

        match stat {
            Ok(stat) => {
                count_gauge.with_label_values(&[url]).set(stat.count as f64);
                capacity_gauge
                    .with_label_values(&[url])
                    .set(stat.capacity as f64);
            }
            Err(err) => {
                tracing::warn!(%err, ?kind, "lock stats unavailable");
                count_gauge.with_label_values(&[url]).set(-1.0);
                capacity_gauge.with_label_values(&[url]).set(-1.0);
            }
        }
    }

    let mut buffer = Vec::new();
    if let Err(err) = TextEncoder::new().encode(&registry.gather(), &mut buffer) {
        tracing::error!(%err, "cannot encode scrape metrics");
        return String::new();
    }

    String::from_utf8(buffer).unwrap_or_default()
}
