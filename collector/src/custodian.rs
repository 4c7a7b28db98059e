//! Total capacity held by the rollup's custodian lock on the base layer.

use client::{
    ckb_types::{Script, SearchKey},
    gw_config::{GwConfig, LockKind},
    CkbIndexerRpc,
};

use crate::{
    convert::convert_int,
    error::{Error, Result},
};

/// Cells requested per indexer page.
pub const CELLS_PAGE_LIMIT: u64 = 1000;

/// Sum the capacity of every live custodian-lock cell of the configured
/// rollup.
///
/// Walks the indexer page by page until it returns the `"0x"` cursor. A
/// failed page aborts the whole walk: a partial sum is not a custodian
/// capacity, so the caller publishes the unavailable sentinel instead.
pub async fn sum_custodian_capacity<I>(indexer: &I, gw_config: &GwConfig) -> Result<u128>
where
    I: CkbIndexerRpc,
{
    let search_key = SearchKey {
        script: Script {
            code_hash: gw_config.lock_type_hash(LockKind::Custodian),
            hash_type: "type".to_owned(),
            args: format!("{:#x}", gw_config.rollup_type_hash()),
        },
        script_type: "lock".to_owned(),
    };

    let mut capacity: u128 = 0;
    let mut cursor: Option<String> = None;
    let mut page: usize = 0;

    loop {
        let res = indexer
            .get_cells(&search_key, CELLS_PAGE_LIMIT, cursor.as_deref())
            .await
            .map_err(|source| Error::Pagination { page, source })?;

        for cell in &res.objects {
            capacity += convert_int(&cell.output.capacity)?;
        }

        if res.last_cursor == "0x" {
            break;
        }

        tracing::debug!(cursor = %res.last_cursor, capacity, "walking custodian cells");
        cursor = Some(res.last_cursor);
        page += 1;
    }

    Ok(capacity)
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    };

    use async_trait::async_trait;
    use client::ckb_types::{CellOutput, CellPage, IndexerCell};
    use ethers::types::H256;
    use pretty_assertions::assert_eq;

    use super::*;

    /// Serves a prepared sequence of pages, one per call.
    struct PagedIndexer {
        pages: Mutex<Vec<client::Result<CellPage>>>,
        calls: AtomicUsize,
    }

    impl PagedIndexer {
        fn new(pages: Vec<client::Result<CellPage>>) -> Self {
            Self {
                pages: Mutex::new(pages),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CkbIndexerRpc for PagedIndexer {
        async fn get_cells(
            &self,
            _search_key: &SearchKey,
            limit: u64,
            _cursor: Option<&str>,
        ) -> client::Result<CellPage> {
            assert_eq!(limit, CELLS_PAGE_LIMIT);

            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            let mut pages = self.pages.lock().unwrap();
            let slot = pages
                .get_mut(call)
                .expect("walk requested a page past the prepared sequence");

            std::mem::replace(
                slot,
                Err(client::Error::unexpected("get_cells", "page already served")),
            )
        }
    }

    fn page(capacities: &[&str], last_cursor: &str) -> CellPage {
        CellPage {
            objects: capacities
                .iter()
                .map(|capacity| IndexerCell {
                    output: CellOutput {
                        capacity: (*capacity).to_owned(),
                        lock: Script {
                            code_hash: H256::repeat_byte(0xcc),
                            hash_type: "type".to_owned(),
                            args: "0x".to_owned(),
                        },
                    },
                })
                .collect(),
            last_cursor: last_cursor.to_owned(),
        }
    }

    #[tokio::test]
    async fn walk_terminates_on_the_sentinel_cursor() {
        let indexer = PagedIndexer::new(vec![
            Ok(page(&["0x64", "100"], "0xabc")),
            Ok(page(&["0x1", "2", "0x3"], "0xdef")),
            Ok(page(&[], "0x")),
        ]);

        let total = sum_custodian_capacity(&indexer, &client::gw_config::testnet_config())
            .await
            .unwrap();

        assert_eq!(total, 0x64 + 100 + 1 + 2 + 3);
        assert_eq!(indexer.calls(), 3);
    }

    #[tokio::test]
    async fn single_page_walk_makes_one_request() {
        let indexer = PagedIndexer::new(vec![Ok(page(&["0x2540be400"], "0x"))]);

        let total = sum_custodian_capacity(&indexer, &client::gw_config::testnet_config())
            .await
            .unwrap();

        assert_eq!(total, 0x2540be400);
        assert_eq!(indexer.calls(), 1);
    }

    #[tokio::test]
    async fn failed_page_aborts_without_a_partial_sum() {
        let indexer = PagedIndexer::new(vec![
            Ok(page(&["0x64"], "0xabc")),
            Err(client::Error::unexpected("get_cells", "indexer down")),
        ]);

        let err = sum_custodian_capacity(&indexer, &client::gw_config::testnet_config())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Pagination { page: 1, .. }));
    }

    #[tokio::test]
    async fn unparseable_capacity_aborts_the_walk() {
        let indexer = PagedIndexer::new(vec![Ok(page(&["plenty"], "0x"))]);

        let err = sum_custodian_capacity(&indexer, &client::gw_config::testnet_config())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Conversion(_)));
    }
}
