use std::net::SocketAddr;

use envconfig::Envconfig;
use url::Url;

/// The exporter's environment contract.
///
/// The four URLs and the network selector are required; everything else
/// has a default.
#[derive(Envconfig, Debug)]
pub(crate) struct Config {
    /// The godwoken web3 endpoint.
    #[envconfig(from = "WEB3_URL")]
    pub web3_url: Url,

    /// The godwoken full node.
    #[envconfig(from = "GW_RPC_URL")]
    pub gw_rpc_url: Url,

    /// The CKB indexer.
    #[envconfig(from = "CKB_INDEXER_URL")]
    pub ckb_indexer_url: Url,

    /// The CKB node.
    #[envconfig(from = "CKB_RPC_URL")]
    pub ckb_rpc_url: Url,

    /// `mainnet` selects the mainnet script-hash table; any other value
    /// selects testnet.
    #[envconfig(from = "NET_ENV")]
    pub net_env: String,

    /// Address to serve the metrics endpoint on.
    #[envconfig(from = "LISTEN_ADDR", default = "0.0.0.0:3000")]
    pub listen_addr: SocketAddr,

    /// Timeout applied to every upstream RPC request, in seconds.
    #[envconfig(from = "RPC_TIMEOUT_SECS", default = "5")]
    pub rpc_timeout_secs: u64,
}
