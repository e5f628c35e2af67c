mod common;

use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;

use common::*;
use lattice_authorizer::ResultCode;
use lattice_store::AccountCollection;

#[test]
fn racing_double_spend_commits_exactly_once() {
    let h = Harness::new();
    let genesis = h.head(&id(&h.genesis_owner)).unwrap();
    let mut left = send_after(&h.genesis_owner, &genesis, &id(&keys(2)), 10, h.now());
    let mut right = send_after(&h.genesis_owner, &genesis, &id(&keys(3)), 20, h.now());

    // Both pass validation before either is stored.
    assert_eq!(h.authorizer.authorize(&mut left).unwrap().code, ResultCode::Success);
    assert_eq!(h.authorizer.authorize(&mut right).unwrap().code, ResultCode::Success);

    let next_u_index = AtomicU64::new(h.next_u_index());
    let codes: Vec<ResultCode> = thread::scope(|s| {
        let handles: Vec<_> = [&mut left, &mut right]
            .into_iter()
            .map(|block| {
                let authorizer = &h.authorizer;
                let next_u_index = &next_u_index;
                s.spawn(move || {
                    block.u_index = next_u_index.fetch_add(1, Ordering::SeqCst);
                    authorizer.commit(block).unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let committed = codes.iter().filter(|c| c.is_success()).count();
    assert_eq!(committed, 1, "codes: {codes:?}");
    assert!(codes.contains(&ResultCode::BlockWithThisIndexAlreadyExists));
    assert!(h
        .store
        .find_block_by_index(&id(&h.genesis_owner), genesis.index + 1)
        .unwrap()
        .is_some());
}

#[test]
fn concurrent_authorizations_of_independent_accounts() {
    let h = Harness::new();
    let owners: Vec<_> = (10..18).map(keys).collect();
    for owner in &owners {
        h.fund(owner, 100);
    }

    let blocks: Vec<_> = owners
        .iter()
        .map(|owner| h.send(owner, &id(&h.genesis_owner), lattice_types::NATIVE_TICKER, 5))
        .collect();

    thread::scope(|s| {
        for mut block in blocks {
            let authorizer = &h.authorizer;
            s.spawn(move || {
                let outcome = authorizer.authorize(&mut block).unwrap();
                assert_eq!(outcome.code, ResultCode::Success);
                assert_eq!(block.authorizations.len(), 1);
            });
        }
    });
    assert_eq!(h.authorizer.metrics().blocks_rejected.get(), 0);
}
