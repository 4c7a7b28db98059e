#![deny(unused_crate_dependencies)]
#![warn(missing_docs)]
#![warn(unused_extern_crates)]
#![warn(unused_imports)]

//! The collection pipeline of the exporter: per-scrape block queries,
//! custodian capacity aggregation and deposit/withdrawal lock statistics,
//! all generic over the `client` RPC traits.

mod error;

pub mod block_info;
pub mod convert;
pub mod custodian;
pub mod lock_stat;

pub use block_info::{BlockDetail, BlockInfo, TipStats};
pub use convert::{convert_int, convert_u64};
pub use custodian::{sum_custodian_capacity, CELLS_PAGE_LIMIT};
pub use error::{ConversionError, Error, Result};
pub use lock_stat::{stat_by_lock, LockStat};
