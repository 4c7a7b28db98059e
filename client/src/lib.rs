#![deny(unused_crate_dependencies)]
#![warn(missing_docs)]
#![warn(unused_extern_crates)]
#![warn(unused_imports)]

//! Typed clients for the upstream RPC services the exporter scrapes:
//! the godwoken web3 endpoint, the godwoken full node, the CKB node and
//! the CKB indexer.

mod error;

pub use error::{Error, Result};

use async_trait::async_trait;
use auto_impl::auto_impl;
use ethers::{
    providers::{JsonRpcClient, Provider},
    types::H256,
    utils::serialize,
};

pub mod ckb_types;
pub mod gw_config;
pub mod gw_types;

use ckb_types::{CellPage, SearchKey, TransactionWithStatus};
use gw_types::{L2BlockCommittedInfo, L2BlockWithStatus};

/// Page order of the indexer's `get_cells` walk.
const CELLS_ORDER: &str = "asc";

/// The godwoken web3 endpoint.
///
/// The web3 service answers `eth_*`/`web3_*` methods itself and proxies
/// `gw_*` methods through to the rollup node, so both logical interfaces
/// live on one URL.
#[async_trait]
#[auto_impl(&, Arc, Box)]
pub trait GodwokenWeb3Rpc {
    /// Call `eth_blockNumber`.
    ///
    /// Returns the quantity literal exactly as the node sent it; the
    /// caller interprets it.
    async fn eth_block_number(&self) -> Result<String>;

    /// Call `gw_get_tip_block_hash`.
    async fn tip_block_hash(&self) -> Result<H256>;

    /// Call `gw_get_block`.
    async fn block_by_hash(&self, block_hash: H256) -> Result<L2BlockWithStatus>;

    /// Call `gw_get_block_by_number`.
    ///
    /// The node expects the number as a `0x`-prefixed quantity.
    async fn block_by_number(&self, number: u64) -> Result<L2BlockWithStatus>;

    /// Call `gw_get_block_hash`.
    async fn block_hash_by_number(&self, number: u64) -> Result<H256>;

    /// Call `gw_ping`.
    async fn gw_ping(&self) -> Result<String>;

    /// Call `web3_clientVersion`.
    async fn client_version(&self) -> Result<String>;
}

/// The godwoken full node.
#[async_trait]
#[auto_impl(&, Arc, Box)]
pub trait GodwokenRpc {
    /// Call `gw_get_block_committed_info`: the L1 transaction that
    /// committed the given rollup block.
    async fn block_committed_info(&self, block_hash: H256) -> Result<L2BlockCommittedInfo>;
}

/// The CKB node.
#[async_trait]
#[auto_impl(&, Arc, Box)]
pub trait CkbRpc {
    /// Call `get_transaction`.
    async fn get_transaction(&self, tx_hash: H256) -> Result<TransactionWithStatus>;
}

/// The CKB indexer.
#[async_trait]
#[auto_impl(&, Arc, Box)]
pub trait CkbIndexerRpc {
    /// Call `get_cells`: one page of live cells matching `search_key`.
    ///
    /// `cursor` is `None` for the first page and the previous page's
    /// `last_cursor` afterwards.
    async fn get_cells(
        &self,
        search_key: &SearchKey,
        limit: u64,
        cursor: Option<&str>,
    ) -> Result<CellPage>;
}

#[async_trait]
impl<P: JsonRpcClient> GodwokenWeb3Rpc for Provider<P> {
    async fn eth_block_number(&self) -> Result<String> {
        let res = self
            .request::<[(); 0], String>("eth_blockNumber", [])
            .await?;

        Ok(res)
    }

    async fn tip_block_hash(&self) -> Result<H256> {
        let res = self
            .request::<[(); 0], H256>("gw_get_tip_block_hash", [])
            .await?;

        Ok(res)
    }

    async fn block_by_hash(&self, block_hash: H256) -> Result<L2BlockWithStatus> {
        let res = self
            .request::<[H256; 1], Option<L2BlockWithStatus>>("gw_get_block", [block_hash])
            .await?;

        res.ok_or_else(|| Error::unexpected("gw_get_block", format!("no block {block_hash:?}")))
    }

    async fn block_by_number(&self, number: u64) -> Result<L2BlockWithStatus> {
        let params = vec![serialize(&format!("{number:#x}"))];
        let res = self
            .request::<_, Option<L2BlockWithStatus>>("gw_get_block_by_number", params)
            .await?;

        res.ok_or_else(|| Error::unexpected("gw_get_block_by_number", format!("no block {number}")))
    }

    async fn block_hash_by_number(&self, number: u64) -> Result<H256> {
        let params = vec![serialize(&format!("{number:#x}"))];
        let res = self
            .request::<_, Option<H256>>("gw_get_block_hash", params)
            .await?;

        res.ok_or_else(|| Error::unexpected("gw_get_block_hash", format!("no block {number}")))
    }

    async fn gw_ping(&self) -> Result<String> {
        let res = self.request::<[(); 0], String>("gw_ping", []).await?;

        Ok(res)
    }

    async fn client_version(&self) -> Result<String> {
        let res = self
            .request::<[(); 0], String>("web3_clientVersion", [])
            .await?;

        Ok(res)
    }
}

#[async_trait]
impl<P: JsonRpcClient> GodwokenRpc for Provider<P> {
    async fn block_committed_info(&self, block_hash: H256) -> Result<L2BlockCommittedInfo> {
        let res = self
            .request::<[H256; 1], Option<L2BlockCommittedInfo>>(
                "gw_get_block_committed_info",
                [block_hash],
            )
            .await?;

        res.ok_or_else(|| {
            Error::unexpected(
                "gw_get_block_committed_info",
                format!("block {block_hash:?} has no committed info"),
            )
        })
    }
}

#[async_trait]
impl<P: JsonRpcClient> CkbRpc for Provider<P> {
    async fn get_transaction(&self, tx_hash: H256) -> Result<TransactionWithStatus> {
        let res = self
            .request::<[H256; 1], Option<TransactionWithStatus>>("get_transaction", [tx_hash])
            .await?;

        res.ok_or_else(|| {
            Error::unexpected("get_transaction", format!("unknown transaction {tx_hash:?}"))
        })
    }
}

#[async_trait]
impl<P: JsonRpcClient> CkbIndexerRpc for Provider<P> {
    async fn get_cells(
        &self,
        search_key: &SearchKey,
        limit: u64,
        cursor: Option<&str>,
    ) -> Result<CellPage> {
        let params = vec![
            serialize(search_key),
            serialize(&CELLS_ORDER),
            serialize(&format!("{limit:#x}")),
            serialize(&cursor),
        ];
        let res = self.request("get_cells", params).await?;

        Ok(res)
    }
}
