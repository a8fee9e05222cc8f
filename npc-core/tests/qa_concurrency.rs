//! QA tests for the thread-shared flyweight cache.

use npc_core::testing::{goblin, villager};
use npc_core::{NpcFlyweight, NpcKind, SharedFlyweightCache};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

const THREADS: usize = 16;

#[test]
fn test_racing_on_unseen_key_builds_one_record() {
    let cache: SharedFlyweightCache<NpcKind, NpcFlyweight> = SharedFlyweightCache::new();
    let builds = Arc::new(AtomicUsize::new(0));
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let cache = cache.clone();
            let builds = Arc::clone(&builds);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let traits = goblin();
                barrier.wait();
                cache.get_or_create(traits.kind(), |_| {
                    builds.fetch_add(1, Ordering::SeqCst);
                    NpcFlyweight::new(&traits)
                })
            })
        })
        .collect();

    let records: Vec<Arc<NpcFlyweight>> = handles
        .into_iter()
        .map(|h| h.join().expect("worker panicked"))
        .collect();

    assert_eq!(builds.load(Ordering::SeqCst), 1);
    assert_eq!(cache.len(), 1);
    assert!(records.iter().all(|r| Arc::ptr_eq(r, &records[0])));

    let stats = cache.stats();
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.hits, (THREADS - 1) as u64);
}

#[test]
fn test_mixed_keys_across_threads() {
    let cache: SharedFlyweightCache<NpcKind, NpcFlyweight> = SharedFlyweightCache::new();

    let handles: Vec<_> = (0..THREADS)
        .map(|i| {
            let cache = cache.clone();
            thread::spawn(move || {
                let traits = if i % 2 == 0 { goblin() } else { villager() };
                cache.get_or_create(traits.kind(), |_| NpcFlyweight::new(&traits));
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("worker panicked");
    }

    assert_eq!(cache.len(), 2);
    assert!(cache.contains(&goblin().kind()));
    assert!(cache.contains(&villager().kind()));
}

#[test]
fn test_cache_survives_panicking_builder() {
    let cache: SharedFlyweightCache<NpcKind, NpcFlyweight> = SharedFlyweightCache::new();

    let worker = cache.clone();
    let result = thread::spawn(move || {
        worker.get_or_create(goblin().kind(), |_| panic!("builder failed"));
    })
    .join();
    assert!(result.is_err());

    assert!(cache.is_empty());
    let record = cache.get_or_create(goblin().kind(), |_| NpcFlyweight::new(&goblin()));
    assert_eq!(record.npc_type(), "Goblin");
}
