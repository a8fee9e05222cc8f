//! QA tests for flyweight sharing and rendering.
//!
//! Run with: `cargo test -p npc-core --test qa_flyweight`

use npc_core::testing::{assert_cache_size, assert_distinct, assert_shared, goblin, shopkeeper, villager};
use npc_core::{Crowd, NpcFlyweightFactory, NpcState, NpcTraits, Position, Roster, TestHarness};
use std::collections::HashSet;
use std::sync::Arc;

// =============================================================================
// Identity
// =============================================================================

#[test]
fn test_equal_keys_share_one_record_despite_other_fields() {
    let mut factory = NpcFlyweightFactory::new();
    let first = factory.get_or_create(&goblin());
    let second = factory.get_or_create(&NpcTraits::new(
        "Goblin",
        "Green Goblin",
        "Backstab",
        "Sneak",
    ));

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(second.base_abilities(), "Slash Attack");
}

#[test]
fn test_distinct_keys_get_distinct_records() {
    let mut factory = NpcFlyweightFactory::new();
    let traits = [
        goblin(),
        villager(),
        shopkeeper(),
        NpcTraits::new("Goblin", "Goblin Shaman", "Hex", "Cast"),
        NpcTraits::new("Gob", "linGreen Goblin", "", ""),
    ];

    let records: Vec<_> = traits.iter().map(|t| factory.get_or_create(t)).collect();
    for (i, a) in records.iter().enumerate() {
        for b in &records[i + 1..] {
            assert!(!Arc::ptr_eq(a, b));
        }
    }
    assert_eq!(factory.len(), traits.len());
}

#[test]
fn test_cache_size_counts_distinct_keys() {
    let mut factory = NpcFlyweightFactory::new();
    let requests = [
        goblin(),
        villager(),
        goblin(),
        goblin(),
        shopkeeper(),
        villager(),
    ];
    for traits in &requests {
        factory.get_or_create(traits);
    }

    let distinct: HashSet<_> = requests.iter().map(|t| t.kind()).collect();
    assert_eq!(factory.len(), distinct.len());
    assert_eq!(factory.len(), 3);
    assert_eq!(factory.stats().hits, 3);
    assert_eq!(factory.stats().misses, 3);
}

#[test]
fn test_goblin_twice_then_villager() {
    let mut harness = TestHarness::new();
    let a = harness.spawn(&goblin(), 0, 0);
    let b = harness.spawn(&goblin(), 4, 4);
    let c = harness.spawn(&villager(), 1, 2);

    assert_cache_size(&harness, 2);
    assert_shared(&harness, a, b);
    assert_distinct(&harness, a, c);
}

// =============================================================================
// Rendering
// =============================================================================

#[test]
fn test_shopkeeper_miss_then_render() {
    let mut factory = NpcFlyweightFactory::new();
    let flyweight = factory.get_flyweight("Shopkeeper", "Merchant", "Trade", "Idle, Talk, Walk");
    let text = flyweight
        .render(&NpcState::new(Position::new(1, 1), 10, "Idle"))
        .to_string();

    for value in [
        "Shopkeeper",
        "Merchant",
        "Trade",
        "Idle, Talk, Walk",
        "(1,1)",
        "10",
    ] {
        assert_eq!(text.matches(value).count(), 1, "{value:?} in {text}");
    }
    assert!(text.contains("Action: Idle"));
}

#[test]
fn test_render_does_not_touch_shared_record() {
    let mut factory = NpcFlyweightFactory::new();
    let flyweight = factory.get_or_create(&villager());
    let before = flyweight.traits();

    let states = [
        NpcState::new(Position::new(0, 0), 10, "Idle"),
        NpcState::new(Position::new(5, 5), 1, "Walk"),
        NpcState::new(Position::new(-2, 8), 99, "Talk"),
    ];
    let renderings: Vec<_> = states.iter().map(|s| flyweight.render(s)).collect();

    assert_eq!(flyweight.traits(), before);
    for rendering in &renderings {
        assert_eq!(rendering.value("NPC Type"), Some("Villager"));
        assert_eq!(rendering.value("Appearance"), Some("Peasant"));
        assert_eq!(rendering.value("Abilities"), Some("None"));
        assert_eq!(rendering.value("Animations"), Some("Idle, Talk, Walk"));
    }
    assert_eq!(renderings[1].value("Position"), Some("(5,5)"));
    assert_eq!(renderings[2].value("Health"), Some("99"));
}

#[test]
fn test_sample_crowd_renders_in_roster_order() {
    let crowd = Crowd::from_roster(&Roster::sample());
    let types: Vec<_> = crowd
        .render_all()
        .iter()
        .map(|r| r.value("NPC Type").unwrap_or_default().to_string())
        .collect();

    assert_eq!(types, ["Goblin", "Villager", "Shopkeeper", "Goblin"]);
}
