//! Per-network godwoken deployment parameters.
//!
//! The script type hashes below come from the published deployment
//! configurations of the godwoken mainnet and testnet rollups; they are
//! fixed for the lifetime of a deployment.

use ethers::types::H256;

/// Lock scripts the exporter cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockKind {
    /// Script securing funds held in trust on L1 for the rollup.
    Custodian,
    /// Script marking outputs that move funds into the rollup.
    Deposit,
    /// Script marking outputs that move funds out of the rollup.
    Withdrawal,
}

/// Static script-hash table of one godwoken deployment.
///
/// Selected once at startup; immutable afterwards.
#[derive(Debug, Clone)]
pub struct GwConfig {
    rollup_type_hash: H256,
    custodian_lock: H256,
    deposit_lock: H256,
    withdrawal_lock: H256,
}

impl GwConfig {
    /// Script type hash of the given lock kind.
    pub fn lock_type_hash(&self, kind: LockKind) -> H256 {
        match kind {
            LockKind::Custodian => self.custodian_lock,
            LockKind::Deposit => self.deposit_lock,
            LockKind::Withdrawal => self.withdrawal_lock,
        }
    }

    /// Type hash identifying the rollup itself.
    pub fn rollup_type_hash(&self) -> H256 {
        self.rollup_type_hash
    }
}

fn h(literal: &str) -> H256 {
    literal
        .parse()
        .expect("deployment tables hold valid 32-byte hash literals; qed")
}

/// Table of the godwoken mainnet deployment.
pub fn mainnet_config() -> GwConfig {
    GwConfig {
        rollup_type_hash: h(
            "0x40d73f0d3c561fcaae330eabc030d8d96a9d0af36d0c5114883658a350cb9e3b",
        ),
        custodian_lock: h(
            "0xff602581f07667eef54232cce850cbca2c418b3418611c132fca849d1edcd775",
        ),
        deposit_lock: h(
            "0xe24164e2204f998b088920405dece3dcfd5c1fbcb23aecfce4b3d3edf1488897",
        ),
        withdrawal_lock: h(
            "0x3714af858b8b82b2bb8f13d51f3cffede2dd8d352a6938334bb79e6b845e3658",
        ),
    }
}

/// Table of the godwoken testnet deployment.
pub fn testnet_config() -> GwConfig {
    GwConfig {
        rollup_type_hash: h(
            "0x4940246f168f4106429dc641add3381a44b5eef61e7754142f594e986671a575",
        ),
        custodian_lock: h(
            "0x85ae4db0dd83f428a31deb342e4000af37ce2c9645d9e619df00096e3c50a2bb",
        ),
        deposit_lock: h(
            "0x50704b84ecb4c4b12b43c7acb260ddd69171c21b4c0ba15f3c469b7d143f6f18",
        ),
        withdrawal_lock: h(
            "0x06ae0706bb2d7997d66224741d3ec7c173dbb2854a6d2cf97088796b677269c6",
        ),
    }
}
