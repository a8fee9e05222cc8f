//! QA tests for roster save/load.
//!
//! Run with: `cargo test -p npc-core --test qa_persistence -- --nocapture`

use npc_core::roster::SavedRoster;
use npc_core::{Crowd, Roster, RosterError};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::TempDir;

#[tokio::test]
async fn test_save_and_load_sample() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("sample.json");

    let roster = Roster::sample();
    roster.save_json(&path).await.expect("save should succeed");

    let loaded = Roster::load_json(&path).await.expect("load should succeed");
    assert_eq!(loaded, roster);
}

#[tokio::test]
async fn test_loaded_roster_rebuilds_same_sharing() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("crowd.json");

    let roster = Roster::random(200, &mut StdRng::seed_from_u64(99));
    roster.save_json(&path).await.expect("save should succeed");
    let loaded = Roster::load_json(&path).await.expect("load should succeed");

    let original = Crowd::from_roster(&roster);
    let restored = Crowd::from_roster(&loaded);
    assert_eq!(restored.len(), 200);
    assert_eq!(restored.factory().kinds(), original.factory().kinds());
    assert_eq!(restored.footprint(), original.footprint());
}

#[tokio::test]
async fn test_peek_metadata() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("sample.json");
    Roster::sample().save_json(&path).await.unwrap();

    let metadata = Roster::peek_metadata(&path).await.unwrap();
    assert_eq!(metadata.entries, 4);
    assert_eq!(metadata.distinct_kinds, 3);
}

#[tokio::test]
async fn test_version_mismatch_rejected() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("future.json");

    let mut saved = SavedRoster::new(Roster::sample());
    saved.version = 99;
    tokio::fs::write(&path, serde_json::to_string(&saved).unwrap())
        .await
        .unwrap();

    match Roster::load_json(&path).await {
        Err(RosterError::VersionMismatch { expected, found }) => {
            assert_eq!(expected, 1);
            assert_eq!(found, 99);
        }
        other => panic!("Expected version mismatch, got {other:?}"),
    }
}

#[tokio::test]
async fn test_empty_roster_rejected() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("empty.json");
    Roster::new().save_json(&path).await.unwrap();

    assert!(matches!(
        Roster::load_json(&path).await,
        Err(RosterError::Empty)
    ));
}

#[tokio::test]
async fn test_missing_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let result = Roster::load_json(temp_dir.path().join("nope.json")).await;
    assert!(matches!(result, Err(RosterError::Io(_))));
}

#[tokio::test]
async fn test_malformed_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("bad.json");
    tokio::fs::write(&path, "{ not json").await.unwrap();

    assert!(matches!(
        Roster::load_json(&path).await,
        Err(RosterError::Json(_))
    ));
}
