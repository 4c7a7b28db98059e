//! The gauge families of one scrape.
//!
//! Metric and label names are part of the exporter's external contract;
//! dashboards and alerts key on them, so they are fixed verbatim here.

use prometheus::{GaugeVec, Opts, Registry};

/// Every gauge family published on `/metrics/godwoken`, registered into
/// one registry.
///
/// A scrape builds a fresh [`Registry`] and a fresh `ScrapeMetrics` on
/// every request, so label combinations of earlier scrapes never linger.
pub struct ScrapeMetrics {
    /// Latest block number per `eth_blockNumber`.
    pub last_block_number: GaugeVec,
    /// `gw_ping` reachability; the reply travels as a label, value is 1.
    pub gw_ping: GaugeVec,
    /// Node software version; the version travels as a label, value is 1.
    pub client_version: GaugeVec,
    /// Tip block hash/number/timestamp as labels; value is the timestamp
    /// delta against the previous block.
    pub last_block_info: GaugeVec,
    /// Transactions committed in the tip block.
    pub block_transactions: GaugeVec,
    /// Timestamp delta between the tip block and its predecessor, in
    /// milliseconds.
    pub block_time_difference: GaugeVec,
    /// Summed capacity of all live custodian-lock cells, in shannon.
    pub custodian_capacity: GaugeVec,
    /// Deposit-lock outputs behind the tip block's commitment.
    pub deposit_count: GaugeVec,
    /// Their summed capacity, in shannon.
    pub deposit_capacity: GaugeVec,
    /// Withdrawal-lock outputs behind the tip block's commitment.
    pub withdrawal_count: GaugeVec,
    /// Their summed capacity, in shannon.
    pub withdrawal_capacity: GaugeVec,
}

fn gauge(
    registry: &Registry,
    name: &str,
    help: &str,
    labels: &[&str],
) -> Result<GaugeVec, prometheus::Error> {
    let gauge = GaugeVec::new(Opts::new(name, help), labels)?;
    registry.register(Box::new(gauge.clone()))?;

    Ok(gauge)
}

impl ScrapeMetrics {
    /// Register every family of the exporter into `registry`.
    pub fn register(registry: &Registry) -> Result<Self, prometheus::Error> {
        Ok(Self {
            last_block_number: gauge(
                registry,
                "Node_Get_LastBlockNumber",
                "Latest block number reported by eth_blockNumber",
                &["web3_url"],
            )?,
            gw_ping: gauge(
                registry,
                "Node_Get_Gw_Ping",
                "gw_ping reachability; the reply is the gw_ping label, value is 1",
                &["web3_url", "gw_ping"],
            )?,
            client_version: gauge(
                registry,
                "Node_Get_Web3_ClientVersion_info",
                "Version string reported by web3_clientVersion, value is 1",
                &["web3_url", "web3_clientVersion"],
            )?,
            last_block_info: gauge(
                registry,
                "Node_Get_LastBlockInfo",
                "Tip block hash, number and timestamp as labels; value is the \
                 timestamp delta against the previous block in milliseconds",
                &[
                    "web3_url",
                    "last_block_hash",
                    "last_blocknumber",
                    "last_block_timestamp",
                ],
            )?,
            block_transactions: gauge(
                registry,
                "Node_Get_BlockDetail_transactions",
                "Number of transactions committed in the tip block",
                &["web3_url"],
            )?,
            block_time_difference: gauge(
                registry,
                "Node_Get_BlockTimeDifference",
                "Timestamp delta between the tip block and its predecessor in milliseconds",
                &["web3_url"],
            )?,
            custodian_capacity: gauge(
                registry,
                "Node_Get_CustodianCapacity",
                "Summed capacity of all live custodian-lock cells in shannon; -1 when unavailable",
                &["web3_url"],
            )?,
            deposit_count: gauge(
                registry,
                "Node_Get_DepositCnt",
                "Deposit-lock outputs behind the tip block's commitment; -1 when unavailable",
                &["web3_url"],
            )?,
            deposit_capacity: gauge(
                registry,
                "Node_Get_DepositCapacity",
                "Summed capacity of deposit-lock outputs in shannon; -1 when unavailable",
                &["web3_url"],
            )?,
            withdrawal_count: gauge(
                registry,
                "Node_Get_WithdrawalCnt",
                "Withdrawal-lock outputs behind the tip block's commitment; -1 when unavailable",
                &["web3_url"],
            )?,
            withdrawal_capacity: gauge(
                registry,
                "Node_Get_WithdrawalCapacity",
                "Summed capacity of withdrawal-lock outputs in shannon; -1 when unavailable",
                &["web3_url"],
            )?,
        })
    }
}
