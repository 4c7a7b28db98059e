//! Block-level queries against the godwoken web3 endpoint and the chained
//! tip/previous walk behind the per-scrape block metrics.

use client::{gw_types::L2BlockWithStatus, GodwokenWeb3Rpc};
use ethers::types::H256;

use crate::{convert::convert_u64, error::Result};

/// A block as the exporter sees it, literals already interpreted.
#[derive(Debug, Clone)]
pub struct BlockDetail {
    /// Block number.
    pub number: u64,
    /// Parent block hash; not reported by number lookups.
    pub parent_block_hash: Option<H256>,
    /// Number of transactions committed in the block.
    pub commit_transactions: usize,
    /// The committed transactions, kept opaque.
    pub transactions: Vec<serde_json::Value>,
    /// Block timestamp, epoch milliseconds.
    pub timestamp: u64,
}

/// The tip-block metrics of one scrape.
#[derive(Debug, Clone, Copy)]
pub struct TipStats {
    /// Hash of the tip block.
    pub hash: H256,
    /// Number of the tip block.
    pub number: u64,
    /// Timestamp of the tip block, epoch milliseconds.
    pub timestamp: u64,
    /// Transactions committed in the tip block.
    pub commit_transactions: usize,
    /// `|tip timestamp - previous timestamp|`, milliseconds.
    pub time_difference: u64,
}

/// Block queries over a godwoken web3 client.
#[derive(Debug)]
pub struct BlockInfo<W> {
    web3: W,
}

impl<W: GodwokenWeb3Rpc> BlockInfo<W> {
    /// Wrap a web3 client.
    pub fn new(web3: W) -> Self {
        Self { web3 }
    }

    /// Latest block height per `eth_blockNumber`.
    pub async fn last_block_height(&self) -> Result<u64> {
        let literal = self.web3.eth_block_number().await?;

        Ok(convert_u64(&literal)?)
    }

    /// Hash of the rollup's tip block.
    pub async fn last_block_hash(&self) -> Result<H256> {
        Ok(self.web3.tip_block_hash().await?)
    }

    /// Full detail of the block with the given hash.
    pub async fn block_detail(&self, block_hash: H256) -> Result<BlockDetail> {
        let block = self.web3.block_by_hash(block_hash).await?;

        detail_of(block, true)
    }

    /// Full detail of the block with the given number. The number lookup
    /// does not report the parent hash.
    pub async fn block_detail_by_number(&self, number: u64) -> Result<BlockDetail> {
        let block = self.web3.block_by_number(number).await?;

        detail_of(block, false)
    }

    /// Hash of the block with the given number.
    pub async fn block_hash_by_number(&self, number: u64) -> Result<H256> {
        Ok(self.web3.block_hash_by_number(number).await?)
    }

    /// The chained walk behind the block metrics of one scrape: detail of
    /// the tip block, then its predecessor resolved by number, then the
    /// absolute timestamp delta between the two.
    ///
    /// Any failure along the chain aborts the whole walk; the caller
    /// publishes nothing from it for this scrape.
    pub async fn tip_stats(&self, tip_hash: H256) -> Result<TipStats> {
        let last = self.block_detail(tip_hash).await?;

        let previous_number = last.number.checked_sub(1).ok_or_else(|| {
            client::Error::unexpected("gw_get_block_hash", "tip block has no predecessor")
        })?;
        let previous_hash = self.block_hash_by_number(previous_number).await?;
        let previous = self.block_detail(previous_hash).await?;

        Ok(TipStats {
            hash: tip_hash,
            number: last.number,
            timestamp: last.timestamp,
            commit_transactions: last.commit_transactions,
            time_difference: last.timestamp.abs_diff(previous.timestamp),
        })
    }
}

fn detail_of(block: L2BlockWithStatus, with_parent: bool) -> Result<BlockDetail> {
    let raw = block.block.raw;

    Ok(BlockDetail {
        number: convert_u64(&raw.number)?,
        parent_block_hash: with_parent.then_some(raw.parent_block_hash),
        commit_transactions: block.block.transactions.len(),
        transactions: block.block.transactions,
        timestamp: convert_u64(&raw.timestamp)?,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use async_trait::async_trait;
    use client::gw_types::{L2Block, RawL2Block};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::error::Error;

    fn h(byte: u8) -> H256 {
        H256::repeat_byte(byte)
    }

    fn block(number: &str, parent: H256, timestamp: &str, transactions: usize) -> L2BlockWithStatus {
        L2BlockWithStatus {
            block: L2Block {
                raw: RawL2Block {
                    number: number.to_owned(),
                    parent_block_hash: parent,
                    timestamp: timestamp.to_owned(),
                },
                transactions: vec![serde_json::json!({}); transactions],
            },
            status: Some("finalized".to_owned()),
        }
    }

    /// A web3 endpoint over a fixed set of blocks.
    struct FakeWeb3 {
        tip: H256,
        blocks_by_hash: HashMap<H256, L2BlockWithStatus>,
        hashes_by_number: HashMap<u64, H256>,
    }

    #[async_trait]
    impl GodwokenWeb3Rpc for FakeWeb3 {
        async fn eth_block_number(&self) -> client::Result<String> {
            Ok("0x2a".to_owned())
        }

        async fn tip_block_hash(&self) -> client::Result<H256> {
            Ok(self.tip)
        }

        async fn block_by_hash(&self, block_hash: H256) -> client::Result<L2BlockWithStatus> {
            self.blocks_by_hash
                .get(&block_hash)
                .cloned()
                .ok_or_else(|| client::Error::unexpected("gw_get_block", "no such block"))
        }

        async fn block_by_number(&self, number: u64) -> client::Result<L2BlockWithStatus> {
            let hash = self.block_hash_by_number(number).await?;
            self.block_by_hash(hash).await
        }

        async fn block_hash_by_number(&self, number: u64) -> client::Result<H256> {
            self.hashes_by_number
                .get(&number)
                .copied()
                .ok_or_else(|| client::Error::unexpected("gw_get_block_hash", "no such block"))
        }

        async fn gw_ping(&self) -> client::Result<String> {
            Ok("pong".to_owned())
        }

        async fn client_version(&self) -> client::Result<String> {
            Ok("Godwoken/v1".to_owned())
        }
    }

    fn two_block_chain(tip_timestamp: &str, previous_timestamp: &str) -> FakeWeb3 {
        FakeWeb3 {
            tip: h(2),
            blocks_by_hash: HashMap::from([
                (h(2), block("0x10", h(1), tip_timestamp, 3)),
                (h(1), block("0xf", h(0), previous_timestamp, 1)),
            ]),
            hashes_by_number: HashMap::from([(0x10, h(2)), (0xf, h(1))]),
        }
    }

    #[tokio::test]
    async fn height_interprets_the_literal() {
        let info = BlockInfo::new(two_block_chain("1000", "700"));

        assert_eq!(info.last_block_height().await.unwrap(), 42);
    }

    #[tokio::test]
    async fn tip_stats_walks_to_the_previous_block() {
        let info = BlockInfo::new(two_block_chain("1000", "700"));

        let stats = info.tip_stats(h(2)).await.unwrap();
        assert_eq!(stats.number, 0x10);
        assert_eq!(stats.timestamp, 1000);
        assert_eq!(stats.commit_transactions, 3);
        assert_eq!(stats.time_difference, 300);
    }

    #[tokio::test]
    async fn time_difference_is_order_independent() {
        // Previous block reported *after* the tip; the delta is absolute.
        let info = BlockInfo::new(two_block_chain("700", "1000"));

        let stats = info.tip_stats(h(2)).await.unwrap();
        assert_eq!(stats.time_difference, 300);
    }

    #[tokio::test]
    async fn missing_previous_block_aborts_the_walk() {
        let mut web3 = two_block_chain("1000", "700");
        web3.hashes_by_number.remove(&0xf);

        let info = BlockInfo::new(web3);
        assert!(info.tip_stats(h(2)).await.is_err());
    }

    #[tokio::test]
    async fn detail_by_number_omits_the_parent_hash() {
        let info = BlockInfo::new(two_block_chain("1000", "700"));

        let by_hash = info.block_detail(h(2)).await.unwrap();
        assert_eq!(by_hash.parent_block_hash, Some(h(1)));

        let by_number = info.block_detail_by_number(0x10).await.unwrap();
        assert_eq!(by_number.parent_block_hash, None);
        assert_eq!(by_number.number, by_hash.number);
    }

    #[tokio::test]
    async fn unparseable_timestamp_is_a_conversion_error() {
        let mut web3 = two_block_chain("1000", "700");
        web3.blocks_by_hash
            .get_mut(&h(2))
            .unwrap()
            .block
            .raw
            .timestamp = "soon".to_owned();

        let info = BlockInfo::new(web3);
        assert!(matches!(
            info.block_detail(h(2)).await.unwrap_err(),
            Error::Conversion(_)
        ));
    }
}
