//! # Sidechain Core Subsystem Benchmarks
//!
//! | Subsystem | Operation | Expected cost |
//! |-----------|-----------|---------------|
//! | sc-01 Mainchain | header parse + double SHA-256 | O(header size) |
//! | sc-02 Mempool | admit (copy-on-write) | O(pool size) |
//! | sc-02 Mempool | take_top | O(n log n) |
//! | sc-03 App State | commit to two stores | O(changes) |
//! | sc-03 App State | recovery planning | O(stores² × depth) |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::Rng;
use sc_01_mainchain::test_utils::{mine_chain, mine_header, regtest_header_builder};
use sc_01_mainchain::{parse_headers, MainchainHeader};
use sc_02_mempool::{MempoolConfig, TransactionPool};
use sc_03_app_state::{plan_recovery, InMemoryVersionedStore, MultiStoreState, VersionedStore};
use sc_tests::integration::SimTx;
use shared_types::{TxId, VersionId};

// ============================================================================
// SC-01: Mainchain Header Codec
// ============================================================================

fn bench_header_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("sc-01-mainchain");

    let header = mine_header(regtest_header_builder().time(1_600_000_000));
    let bytes = header.bytes().to_vec();
    group.throughput(Throughput::Bytes(bytes.len() as u64));

    group.bench_function("parse", |b| {
        b.iter(|| black_box(MainchainHeader::parse(black_box(&bytes), 0)))
    });

    group.bench_function("parse_and_hash", |b| {
        b.iter(|| {
            let parsed = MainchainHeader::parse(black_box(&bytes), 0).map(|h| h.hash());
            black_box(parsed)
        })
    });

    let chain: Vec<u8> = mine_chain([0u8; 32], 16, 1_600_000_000)
        .iter()
        .flat_map(|h| h.bytes().to_vec())
        .collect();
    group.bench_function("parse_headers_16", |b| {
        b.iter(|| black_box(parse_headers(black_box(&chain))))
    });

    group.finish();
}

// ============================================================================
// SC-02: Transaction Pool
// ============================================================================

fn random_tx(rng: &mut impl Rng, n: u32) -> SimTx {
    let mut id: TxId = [0u8; 32];
    id[..4].copy_from_slice(&n.to_be_bytes());
    let mut input = [0xFFu8; 32];
    input[..4].copy_from_slice(&n.to_be_bytes());
    SimTx {
        id,
        fee: rng.gen_range(0..1_000),
        inputs: vec![input],
    }
}

fn pool_of(size: u32) -> TransactionPool<SimTx> {
    let mut rng = rand::thread_rng();
    let config = MempoolConfig {
        max_transactions: size as usize + 1,
    };
    let txs: Vec<SimTx> = (0..size).map(|n| random_tx(&mut rng, n)).collect();
    match TransactionPool::from_transactions(config, txs) {
        Ok(pool) => pool,
        Err(err) => panic!("benchmark pool setup failed: {err}"),
    }
}

fn bench_pool(c: &mut Criterion) {
    let mut group = c.benchmark_group("sc-02-mempool");

    for size in [100u32, 1_000, 5_000] {
        let pool = pool_of(size);
        let candidate = random_tx(&mut rand::thread_rng(), size);

        group.bench_with_input(BenchmarkId::new("admit", size), &pool, |b, pool| {
            b.iter(|| black_box(pool.admit(candidate.clone())))
        });

        group.bench_with_input(BenchmarkId::new("take_top_100", size), &pool, |b, pool| {
            b.iter(|| black_box(pool.take_top(100)))
        });

        group.bench_with_input(BenchmarkId::new("lookup", size), &pool, |b, pool| {
            let id = pool.transactions()[0].id;
            b.iter(|| black_box(pool.lookup(&id)))
        });
    }

    group.finish();
}

// ============================================================================
// SC-03: Application State
// ============================================================================

fn version(n: u32) -> VersionId {
    let mut v = [0u8; 32];
    v[28..].copy_from_slice(&n.to_be_bytes());
    v[0] = 1;
    v
}

fn bench_app_state(c: &mut Criterion) {
    let mut group = c.benchmark_group("sc-03-app-state");

    group.bench_function("commit_two_stores_10_upserts", |b| {
        let state = match MultiStoreState::new(vec![
            InMemoryVersionedStore::new(),
            InMemoryVersionedStore::new(),
        ]) {
            Ok(state) => state,
            Err(err) => panic!("benchmark state setup failed: {err}"),
        };
        let _ = state.recover();
        let upserts: Vec<(Vec<u8>, Vec<u8>)> = (0..10u8).map(|k| (vec![k], vec![k; 32])).collect();
        let mut n = 0u32;
        b.iter(|| {
            n += 1;
            black_box(state.on_apply_changes(&version(n), &upserts, &[]).is_ok())
        })
    });

    for depth in [16u32, 256] {
        let ahead: Vec<VersionId> = (1..=depth).rev().map(version).collect();
        let behind: Vec<VersionId> = ahead[depth as usize / 2..].to_vec();
        let tips = [ahead[0], behind[0]];
        let histories = vec![ahead, behind];

        group.bench_with_input(
            BenchmarkId::new("plan_recovery", depth),
            &(tips, histories),
            |b, (tips, histories)| b.iter(|| black_box(plan_recovery(tips, histories))),
        );
    }

    group.bench_function("store_rollback_one_version", |b| {
        let store = InMemoryVersionedStore::new();
        let _ = store.update(&version(1), &[(b"k".to_vec(), b"a".to_vec())], &[]);
        b.iter(|| {
            let _ = store.update(&version(2), &[(b"k".to_vec(), b"b".to_vec())], &[]);
            black_box(store.rollback(&version(1)))
        })
    });

    group.finish();
}

criterion_group!(benches, bench_header_codec, bench_pool, bench_app_state);
criterion_main!(benches);
