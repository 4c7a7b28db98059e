//! Hand-typed subset of the godwoken RPC schema.
//!
//! These are strictly the fields the exporter reads; everything else in the
//! node's responses is ignored on deserialization. Numeric fields stay the
//! quantity literals the node sends (decimal or `0x`-prefixed strings) —
//! interpreting them is the caller's concern.

use ethers::types::H256;
use serde::{Deserialize, Serialize};

/// Response of `gw_get_block` and `gw_get_block_by_number`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct L2BlockWithStatus {
    /// The block body.
    pub block: L2Block,
    /// Rollup-level status of the block (`unfinalized`, `finalized`, ...).
    #[serde(default)]
    pub status: Option<String>,
}

/// An L2 block as the rollup RPC reports it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct L2Block {
    /// Header fields.
    pub raw: RawL2Block,
    /// Transactions committed in this block, kept opaque.
    #[serde(default)]
    pub transactions: Vec<serde_json::Value>,
}

/// The raw header of an L2 block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawL2Block {
    /// Block number literal.
    pub number: String,
    /// Hash of the parent block.
    pub parent_block_hash: H256,
    /// Block timestamp literal, epoch milliseconds.
    pub timestamp: String,
}

/// Response of `gw_get_block_committed_info`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct L2BlockCommittedInfo {
    /// Hash of the L1 transaction that committed the block.
    pub transaction_hash: H256,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn block_response_keeps_literals_and_ignores_extras() {
        let payload = serde_json::json!({
            "block": {
                "raw": {
                    "number": "0x2a",
                    "parent_block_hash":
                        "0x8f66c986e8a0bcdb0ae0196dbd5ca3b0a939f5649a7994ec0ed11b67f6e069fd",
                    "timestamp": "0x17f2c3e7d10",
                    "stake_cell_owner_lock_hash":
                        "0x0000000000000000000000000000000000000000000000000000000000000000"
                },
                "transactions": [{"hash": "0x01"}, {"hash": "0x02"}],
                "withdrawal_requests": []
            },
            "status": "finalized"
        });

        let block: L2BlockWithStatus = serde_json::from_value(payload).unwrap();
        assert_eq!(block.block.raw.number, "0x2a");
        assert_eq!(block.block.raw.timestamp, "0x17f2c3e7d10");
        assert_eq!(block.block.transactions.len(), 2);
        assert_eq!(block.status.as_deref(), Some("finalized"));
    }

    #[test]
    fn committed_info_requires_transaction_hash() {
        let payload = serde_json::json!({
            "number": "0x2a",
            "block_hash":
                "0x8f66c986e8a0bcdb0ae0196dbd5ca3b0a939f5649a7994ec0ed11b67f6e069fd"
        });

        assert!(serde_json::from_value::<L2BlockCommittedInfo>(payload).is_err());
    }
}
