//! Concurrent access tests
//!
//! Writes run with in-place rewriting so that a reader slipping past the
//! collection lock would see a truncated document and fail to decode it.

use std::collections::HashSet;

use pitwall_store::prelude::*;
use tempfile::TempDir;

fn must<T, E: std::fmt::Debug>(r: std::result::Result<T, E>) -> T {
    match r {
        Ok(v) => v,
        Err(e) => panic!("unexpected Err: {e:?}"),
    }
}

const WRITERS: usize = 16;
const READERS: usize = 8;
const READS_PER_READER: usize = 25;

async fn create_in_place_database() -> (JsonDatabase, TempDir) {
    let temp_dir = must(TempDir::new());
    let config = StoreConfig::new(temp_dir.path()).with_atomic_writes(false);
    let db = must(JsonDatabase::open(config).await);
    (db, temp_dir)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_adds_never_lose_updates_or_share_ids() {
    let (db, _temp_dir) = create_in_place_database().await;

    let mut handles = Vec::new();
    for i in 0..WRITERS {
        let db = db.clone();
        handles.push(tokio::spawn(async move {
            db.add_team(Team::new(format!("team-{i}"), ["first", "second"]))
                .await
        }));
    }

    let mut team_ids = HashSet::new();
    let mut driver_ids = HashSet::new();
    for handle in handles {
        let team = must(must(handle.await));
        assert!(team_ids.insert(team.id));
        for driver in team.drivers {
            assert!(driver_ids.insert(driver.id));
        }
    }

    let teams = must(db.list_teams().await);
    assert_eq!(teams.len(), WRITERS);
    assert_eq!(driver_ids.len(), WRITERS * 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_readers_never_observe_partial_documents() {
    let (db, _temp_dir) = create_in_place_database().await;
    must(db.add_event(RaceEvent::new("seed", 0, EventType::Race)).await);

    let mut readers = Vec::new();
    for _ in 0..READERS {
        let db = db.clone();
        readers.push(tokio::spawn(async move {
            let mut last_seen = 0;
            for _ in 0..READS_PER_READER {
                let events = db.list_events().await?;
                // the collection only grows in this test
                assert!(events.len() >= last_seen);
                last_seen = events.len();
                tokio::task::yield_now().await;
            }
            Ok::<usize, StoreError>(last_seen)
        }));
    }

    let mut writers = Vec::new();
    for i in 0..WRITERS {
        let db = db.clone();
        writers.push(tokio::spawn(async move {
            db.add_event(RaceEvent::new(format!("event-{i}"), 0, EventType::Sprint))
                .await
        }));
    }

    for writer in writers {
        must(must(writer.await));
    }
    for reader in readers {
        must(must(reader.await));
    }

    assert_eq!(must(db.list_events().await).len(), WRITERS + 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_collections_lock_independently() {
    let (db, _temp_dir) = create_in_place_database().await;

    let teams = {
        let db = db.clone();
        tokio::spawn(async move {
            for i in 0..WRITERS {
                db.add_team(Team::new(format!("team-{i}"), ["driver"])).await?;
            }
            Ok::<(), StoreError>(())
        })
    };
    let events = {
        let db = db.clone();
        tokio::spawn(async move {
            for i in 0..WRITERS {
                db.add_event(RaceEvent::new(format!("event-{i}"), 0, EventType::Race))
                    .await?;
            }
            Ok::<(), StoreError>(())
        })
    };

    must(must(teams.await));
    must(must(events.await));

    let snapshot = must(db.snapshot().await);
    assert_eq!(snapshot.teams.len(), WRITERS);
    assert_eq!(snapshot.events.len(), WRITERS);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_mixed_updates_and_deletes_keep_document_valid() {
    let (db, _temp_dir) = create_in_place_database().await;
    let mut ids = Vec::new();
    for i in 0..WRITERS {
        ids.push(must(db.add_team(Team::new(format!("team-{i}"), ["d"])).await).id);
    }

    let mut handles = Vec::new();
    for id in ids {
        let db = db.clone();
        handles.push(tokio::spawn(async move {
            if id % 2 == 0 {
                db.delete_team(id).await
            } else {
                let mut team = db.get_team(id).await?;
                team.name = format!("renamed-{id}");
                db.update_team(team).await
            }
        }));
    }
    for handle in handles {
        must(must(handle.await));
    }

    let teams = must(db.list_teams().await);
    assert_eq!(teams.len(), WRITERS / 2);
    assert!(teams.iter().all(|t| t.name.starts_with("renamed-")));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_modifications_of_one_team_are_all_kept() {
    let (db, _temp_dir) = create_in_place_database().await;
    let seats: Vec<String> = (0..WRITERS).map(|i| format!("driver-{i}")).collect();
    let team = must(db.add_team(Team::new("crowded", seats)).await);
    let team_id = team.id;

    let mut handles = Vec::new();
    for driver_id in team.drivers.iter().map(|d| d.id) {
        let db = db.clone();
        handles.push(tokio::spawn(async move {
            db.modify_team(team_id, |team| {
                if let Some(driver) = team.driver_mut(driver_id) {
                    driver.name = format!("renamed-{driver_id}");
                }
                Ok::<_, StoreError>(())
            })
            .await
        }));
    }
    for handle in handles {
        must(must(handle.await));
    }

    let stored = must(db.get_team(team_id).await);
    assert_eq!(stored.drivers.len(), WRITERS);
    assert!(
        stored
            .drivers
            .iter()
            .all(|d| d.name == format!("renamed-{}", d.id))
    );
}
