//! Deposit/withdrawal activity of a rollup block, read off its L1
//! commitment transaction.

use client::{
    ckb_types::TransactionView,
    gw_config::{GwConfig, LockKind},
    CkbRpc, GodwokenRpc,
};
use ethers::types::H256;

use crate::{convert::convert_int, error::Result};

/// Outputs matching one lock kind across a block's commitment inputs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LockStat {
    /// Number of matching outputs.
    pub count: u64,
    /// Their summed capacity, in shannon.
    pub capacity: u128,
}

/// Count and sum the outputs guarded by `kind`'s lock script among the
/// previous outputs consumed by the L1 transaction that committed
/// `block_hash`.
///
/// One extra `get_transaction` round trip per input; deposit and
/// withdrawal invocations against the same block repeat all fetches.
pub async fn stat_by_lock<G, C>(
    gw: &G,
    ckb: &C,
    gw_config: &GwConfig,
    kind: LockKind,
    block_hash: H256,
) -> Result<LockStat>
where
    G: GodwokenRpc,
    C: CkbRpc,
{
    let lock_type_hash = gw_config.lock_type_hash(kind);

    let committed = gw.block_committed_info(block_hash).await?;
    let commit_tx = transaction_body(ckb, committed.transaction_hash).await?;

    let mut stat = LockStat::default();

    if commit_tx.inputs.is_empty() {
        return Ok(stat);
    }

    for input in &commit_tx.inputs {
        let origin = transaction_body(ckb, input.previous_output.tx_hash).await?;

        for output in &origin.outputs {
            if output.lock.code_hash == lock_type_hash {
                stat.count += 1;
                stat.capacity += convert_int(&output.capacity)?;
            }
        }
    }

    Ok(stat)
}

async fn transaction_body<C: CkbRpc>(ckb: &C, tx_hash: H256) -> Result<TransactionView> {
    let res = ckb.get_transaction(tx_hash).await?;

    res.transaction.ok_or_else(|| {
        client::Error::unexpected(
            "get_transaction",
            format!("response for {tx_hash:?} carries no transaction body"),
        )
        .into()
    })
}
