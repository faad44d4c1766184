//! # Integration Test Flows
//!
//! End-to-end scenarios through `BlockProcessor`:
//!
//! 1. **Happy path**: admit → forge → apply block → pool pruned, stores aligned
//! 2. **Header rejection**: invalid or unlinked mainchain headers leave all
//!    subsystems untouched
//! 3. **Crash between store commits**: restart recovery realigns the stores
//! 4. **Reorganization**: rollback reverts every store

#[cfg(test)]
mod tests {
    use crate::init_tracing;
    use crate::integration::driver::*;

    use sc_01_mainchain::test_utils::{mine_chain, mine_header, regtest_header_builder};
    use sc_01_mainchain::{
        HeaderValidationError, MainchainHeader, MainchainHeaderValidator, MockPowVerifier,
        MockTimeSource, NetworkConsensusParams, ParseError,
    };
    use sc_02_mempool::{MempoolConfig, MempoolError, TransactionPool};
    use sc_03_app_state::{
        InMemoryVersionedStore, MultiStoreState, StateConfig, StateError, VersionedStore,
    };
    use shared_types::{BlockId, Hash, StorageError, NULL_VERSION};
    use std::sync::Arc;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    const NOW: u64 = 1_700_000_000;
    const GENESIS_TIP: Hash = [0x77; 32];

    type Store = Arc<InMemoryVersionedStore>;
    type Processor = BlockProcessor<Arc<MockPowVerifier>, MockTimeSource, Store>;

    fn stores() -> Vec<Store> {
        vec![
            Arc::new(InMemoryVersionedStore::new()),
            Arc::new(InMemoryVersionedStore::new()),
        ]
    }

    fn processor_with(
        stores: &[Store],
        verifier: MockPowVerifier,
        params: NetworkConsensusParams,
        mainchain_tip: Hash,
    ) -> Processor {
        init_tracing();
        let validator =
            MainchainHeaderValidator::with_time_source(Arc::new(verifier), MockTimeSource::new(NOW));
        let state = MultiStoreState::with_config(stores.to_vec(), StateConfig::for_testing()).unwrap();
        BlockProcessor::new(
            validator,
            params,
            state,
            TransactionPool::new(MempoolConfig::for_testing()),
            mainchain_tip,
        )
    }

    fn processor(stores: &[Store]) -> Processor {
        processor_with(
            stores,
            MockPowVerifier::accepting(),
            NetworkConsensusParams::regtest(),
            GENESIS_TIP,
        )
    }

    fn encode(headers: &[MainchainHeader]) -> Vec<u8> {
        headers.iter().flat_map(|h| h.bytes().to_vec()).collect()
    }

    fn block_id(n: u8) -> BlockId {
        [0xB0 | n; 32]
    }

    /// Block carrying two fresh mainchain headers on top of `mainchain_tip`.
    fn block_on(mainchain_tip: Hash, n: u8, transactions: Vec<SimTx>) -> SidechainBlock {
        let headers = mine_chain(mainchain_tip, 2, NOW as u32 - 10_000 + u32::from(n) * 1_000);
        SidechainBlock {
            id: block_id(n),
            mainchain_headers: encode(&headers),
            transactions,
        }
    }

    fn fees_of(p: &Processor, store: usize) -> Option<u64> {
        p.state()
            .get(store, FEES_KEY)
            .unwrap()
            .map(|raw| u64::from_le_bytes(raw.try_into().unwrap()))
    }

    // =============================================================================
    // HAPPY PATH
    // =============================================================================

    #[test]
    fn test_block_applies_across_subsystems() {
        let stores = stores();
        let mut p = processor(&stores);

        let report = p.start().unwrap();
        assert_eq!(report.common_version, NULL_VERSION);
        assert!(!report.was_needed());

        let a = SimTx::new(1, 5, &[10]);
        let b = SimTx::new(2, 1, &[11]);
        let c = SimTx::new(3, 9, &[12]);
        let d = SimTx::new(4, 3, &[13]);
        for tx in [a.clone(), b.clone(), c.clone(), d.clone()] {
            p.submit(tx).unwrap();
        }

        // double spend of c's input
        let err = p.submit(SimTx::new(5, 50, &[12])).unwrap_err();
        assert!(matches!(
            err,
            DriverError::Mempool(MempoolError::Incompatible(id)) if id == [5; 32]
        ));
        assert_eq!(p.pool().size(), 4);

        let forged = p.forge(2);
        assert_eq!(forged, vec![c.clone(), a.clone()]);

        // the block also carries an outside transaction spending d's input
        let mut txs = forged;
        txs.push(SimTx::new(9, 0, &[13]));
        let block = block_on(GENESIS_TIP, 1, txs);
        p.apply_block(&block).unwrap();

        assert_eq!(
            p.state().storages_version_list().unwrap(),
            vec![block_id(1), block_id(1)]
        );
        assert_eq!(p.state().get(0, &[12; 32]).unwrap(), Some(vec![3; 32]));
        assert_eq!(fees_of(&p, 1), Some(14));

        // confirmed evicted, conflicting d dropped, b untouched
        assert_eq!(p.pool().transactions(), vec![b]);

        let headers = sc_01_mainchain::parse_headers(&block.mainchain_headers).unwrap();
        assert_eq!(p.mainchain_tip(), headers[1].hash());
    }

    #[test]
    fn test_consecutive_blocks_extend_mainchain_tip() {
        let stores = stores();
        let mut p = processor(&stores);
        p.start().unwrap();

        let first = block_on(GENESIS_TIP, 1, vec![SimTx::new(1, 1, &[1])]);
        p.apply_block(&first).unwrap();

        // headers built on the genesis tip again no longer link
        let stale = block_on(GENESIS_TIP, 2, Vec::new());
        assert!(matches!(
            p.apply_block(&stale),
            Err(DriverError::Disconnected { index: 0 })
        ));

        let second = block_on(p.mainchain_tip(), 2, Vec::new());
        p.apply_block(&second).unwrap();
        assert_eq!(
            p.state().storages_version_list().unwrap(),
            vec![block_id(2), block_id(2)]
        );
    }

    #[test]
    fn test_batch_submission_is_all_or_nothing() {
        let mut p = processor(&stores());
        p.start().unwrap();

        let batch = vec![
            SimTx::new(1, 1, &[1]),
            SimTx::new(2, 2, &[2]),
            SimTx::new(3, 3, &[1]),
        ];
        assert!(matches!(
            p.submit_batch(batch),
            Err(DriverError::Mempool(MempoolError::Incompatible(_)))
        ));
        assert!(p.pool().is_empty());

        p.submit_batch(vec![SimTx::new(1, 1, &[1]), SimTx::new(2, 2, &[2])])
            .unwrap();
        assert_eq!(p.pool().size(), 2);
    }

    // =============================================================================
    // HEADER REJECTION
    // =============================================================================

    #[test]
    fn test_future_mainchain_header_rejects_block() {
        let stores = stores();
        let mut p = processor(&stores);
        p.start().unwrap();
        p.submit(SimTx::new(1, 1, &[1])).unwrap();

        let header = mine_header(
            regtest_header_builder()
                .hash_prev_block(GENESIS_TIP)
                .time((NOW + 7_201) as u32),
        );
        let block = SidechainBlock {
            id: block_id(1),
            mainchain_headers: encode(&[header]),
            transactions: vec![SimTx::new(1, 1, &[1])],
        };

        let err = p.apply_block(&block).unwrap_err();
        assert!(matches!(
            err,
            DriverError::Header {
                index: 0,
                source: HeaderValidationError::TimestampTooFarInFuture { .. }
            }
        ));
        assert_eq!(
            p.state().storages_version_list().unwrap(),
            vec![NULL_VERSION, NULL_VERSION]
        );
        assert_eq!(p.pool().size(), 1);
        assert_eq!(p.mainchain_tip(), GENESIS_TIP);
    }

    #[test]
    fn test_unlinked_second_header_rejects_block() {
        let mut p = processor(&stores());
        p.start().unwrap();

        let mut headers = mine_chain(GENESIS_TIP, 1, NOW as u32 - 5_000);
        headers.extend(mine_chain([0x09; 32], 1, NOW as u32 - 4_000));
        let block = SidechainBlock {
            id: block_id(1),
            mainchain_headers: encode(&headers),
            transactions: Vec::new(),
        };

        assert!(matches!(
            p.apply_block(&block),
            Err(DriverError::Disconnected { index: 1 })
        ));
        assert_eq!(p.mainchain_tip(), GENESIS_TIP);
    }

    #[test]
    fn test_rejected_equihash_solution() {
        let stores = stores();
        let mut p = processor_with(
            &stores,
            MockPowVerifier::rejecting(),
            NetworkConsensusParams::regtest(),
            GENESIS_TIP,
        );
        p.start().unwrap();

        let block = block_on(GENESIS_TIP, 1, Vec::new());
        assert!(matches!(
            p.apply_block(&block),
            Err(DriverError::Header {
                index: 0,
                source: HeaderValidationError::InvalidEquihashSolution
            })
        ));
        assert_eq!(stores[0].last_version_id().unwrap(), None);
    }

    #[test]
    fn test_truncated_mainchain_headers() {
        let mut p = processor(&stores());
        p.start().unwrap();

        let mut bytes = block_on(GENESIS_TIP, 1, Vec::new()).mainchain_headers;
        bytes.pop();
        let block = SidechainBlock {
            id: block_id(1),
            mainchain_headers: bytes,
            transactions: Vec::new(),
        };

        assert!(matches!(
            p.apply_block(&block),
            Err(DriverError::Parse(ParseError::Truncated { .. }))
        ));
    }

    #[test]
    fn test_params_loaded_from_json() {
        let params: NetworkConsensusParams = serde_json::from_str(
            r#"{ "equihash_n": 48, "equihash_k": 5, "equihash_solution_length": 36 }"#,
        )
        .unwrap();
        assert!(params.validate().is_ok());
        assert_eq!(params.pow_limit, None);

        let mut p = processor_with(&stores(), MockPowVerifier::accepting(), params, GENESIS_TIP);
        p.start().unwrap();
        p.apply_block(&block_on(GENESIS_TIP, 1, Vec::new())).unwrap();
    }

    // =============================================================================
    // CRASH RECOVERY
    // =============================================================================

    #[test]
    fn test_crash_between_store_commits_recovers_on_restart() {
        let stores = stores();
        let mut p = processor(&stores);
        p.start().unwrap();

        p.apply_block(&block_on(GENESIS_TIP, 1, vec![SimTx::new(1, 4, &[1])]))
            .unwrap();
        let tip_after_first = p.mainchain_tip();

        // second store dies before committing block 2
        stores[1].set_failure_after(Some(0));
        let second = block_on(tip_after_first, 2, vec![SimTx::new(2, 6, &[2])]);
        let err = p.apply_block(&second).unwrap_err();
        assert!(matches!(
            err,
            DriverError::State(StateError::Storage {
                store: 1,
                source: StorageError::Backend(_)
            })
        ));
        assert_eq!(
            p.state().storages_version_list().unwrap(),
            vec![block_id(2), block_id(1)]
        );

        // no further progress until recovery
        let third = block_on(tip_after_first, 3, Vec::new());
        assert!(matches!(
            p.apply_block(&third),
            Err(DriverError::State(StateError::RecoveryRequired))
        ));
        drop(p);

        // restart over the same stores
        stores[1].set_failure_after(None);
        let mut restarted = processor_with(
            &stores,
            MockPowVerifier::accepting(),
            NetworkConsensusParams::regtest(),
            tip_after_first,
        );
        let report = restarted.start().unwrap();
        assert_eq!(report.common_version, block_id(1));
        assert_eq!(report.rolled_back, vec![0]);
        assert_eq!(
            restarted.state().storages_version_list().unwrap(),
            vec![block_id(1), block_id(1)]
        );
        assert_eq!(fees_of(&restarted, 0), Some(4));

        restarted.apply_block(&second).unwrap();
        assert_eq!(
            restarted.state().storages_version_list().unwrap(),
            vec![block_id(2), block_id(2)]
        );
        assert_eq!(fees_of(&restarted, 0), Some(6));
        assert_eq!(fees_of(&restarted, 1), Some(6));
    }

    #[test]
    fn test_divergent_stores_refuse_to_start() {
        let stores = stores();
        stores[0].update(&block_id(1), &[], &[]).unwrap();
        stores[0].update(&block_id(2), &[], &[]).unwrap();
        stores[1].update(&block_id(1), &[], &[]).unwrap();
        stores[1].update(&block_id(3), &[], &[]).unwrap();

        let p = processor(&stores);
        assert!(matches!(
            p.start(),
            Err(DriverError::State(StateError::Consistency(_)))
        ));
        assert!(!p.state().is_recovered());
    }

    // =============================================================================
    // REORGANIZATION
    // =============================================================================

    #[test]
    fn test_reorg_reverts_every_store() {
        let stores = stores();
        let mut p = processor(&stores);
        p.start().unwrap();

        p.apply_block(&block_on(GENESIS_TIP, 1, vec![SimTx::new(21, 2, &[20])]))
            .unwrap();
        let tip_after_first = p.mainchain_tip();
        p.apply_block(&block_on(tip_after_first, 2, vec![SimTx::new(31, 3, &[30])]))
            .unwrap();

        p.revert_to(&block_id(1)).unwrap();

        assert_eq!(
            p.state().storages_version_list().unwrap(),
            vec![block_id(1), block_id(1)]
        );
        for store in 0..2 {
            assert_eq!(p.state().get(store, &[20; 32]).unwrap(), Some(vec![21; 32]));
            assert_eq!(p.state().get(store, &[30; 32]).unwrap(), None);
            assert_eq!(fees_of(&p, store), Some(2));
        }
        assert_eq!(p.mainchain_tip(), tip_after_first);

        assert!(matches!(
            p.revert_to(&block_id(7)),
            Err(DriverError::UnknownBlock(_))
        ));
    }
}
