//! Hand-typed subset of the CKB node and CKB indexer RPC schemas.
//!
//! Restricted to the fields the exporter reads. `outputs` is deliberately a
//! required field: a `get_transaction` payload without it is a schema
//! violation that must surface as an error, not as an empty scan.

use ethers::types::H256;
use serde::{Deserialize, Serialize};

/// Response of `get_transaction`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionWithStatus {
    /// The transaction body; the node omits it for some statuses.
    #[serde(default)]
    pub transaction: Option<TransactionView>,
}

/// A CKB transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionView {
    /// Consumed outputs. Absent or empty for cellbase-like transactions.
    #[serde(default)]
    pub inputs: Vec<CellInput>,
    /// Produced outputs.
    pub outputs: Vec<CellOutput>,
}

/// A reference to the output an input consumes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CellInput {
    /// Location of the consumed output.
    pub previous_output: OutPoint,
}

/// Location of an output: producing transaction plus output index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutPoint {
    /// Hash of the transaction that produced the output.
    pub tx_hash: H256,
    /// Output index literal within that transaction.
    pub index: String,
}

/// A transaction output: its capacity and the lock script guarding it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CellOutput {
    /// Capacity literal, in shannon.
    pub capacity: String,
    /// Lock script of the output.
    pub lock: Script,
}

/// A CKB script.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Script {
    /// Hash identifying the script's code.
    pub code_hash: H256,
    /// `type` or `data` hashing mode.
    pub hash_type: String,
    /// Script arguments, `0x`-prefixed.
    pub args: String,
}

/// Search key of the indexer's `get_cells`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchKey {
    /// Script the returned cells must be locked by.
    pub script: Script,
    /// Which script of the cell to match, `lock` here.
    pub script_type: String,
}

/// One page of `get_cells` results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CellPage {
    /// Cells of this page.
    pub objects: Vec<IndexerCell>,
    /// Continuation cursor; `"0x"` means the walk is complete.
    pub last_cursor: String,
}

/// A live cell as the indexer reports it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexerCell {
    /// The cell's output record.
    pub output: CellOutput,
}
