//! Integration tests for the league database

use pitwall_store::prelude::*;
use tempfile::TempDir;

fn must<T, E: std::fmt::Debug>(r: std::result::Result<T, E>) -> T {
    match r {
        Ok(v) => v,
        Err(e) => panic!("unexpected Err: {e:?}"),
    }
}

async fn create_test_database() -> (JsonDatabase, TempDir) {
    let temp_dir = must(TempDir::new());
    let db = must(JsonDatabase::open(StoreConfig::new(temp_dir.path())).await);
    (db, temp_dir)
}

fn result(position: u64, points: u64, driver_id: u64, team_id: u64) -> RacePosition {
    RacePosition {
        position,
        points,
        driver_id,
        team_id,
    }
}

mod team_lifecycle {
    use super::*;

    #[tokio::test]
    async fn test_add_then_get_returns_input_with_ids() {
        let (db, _temp_dir) = create_test_database().await;
        let input = Team::new("Nyoom Racing", ["Ada", "Bo"]);

        let added = must(db.add_team(input.clone()).await);
        let loaded = must(db.get_team(added.id).await);

        assert_eq!(loaded, added);
        assert_eq!(loaded.name, input.name);
        let names: Vec<&str> = loaded.drivers.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Ada", "Bo"]);
        let ids: Vec<u64> = loaded.drivers.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![0, 1]);
    }

    #[tokio::test]
    async fn test_driver_ids_are_unique_across_teams() {
        let (db, _temp_dir) = create_test_database().await;

        let first = must(db.add_team(Team::new("First", ["a", "b"])).await);
        let second = must(db.add_team(Team::new("Second", ["c", "d"])).await);

        let second_ids: Vec<u64> = second.drivers.iter().map(|d| d.id).collect();
        assert_eq!(first.id, 0);
        assert_eq!(second.id, 1);
        assert_eq!(second_ids, vec![2, 3]);
    }

    #[tokio::test]
    async fn test_update_then_get_returns_updated_value() {
        let (db, _temp_dir) = create_test_database().await;
        let mut team = must(db.add_team(Team::new("Before", ["a"])).await);

        team.name = "After".to_string();
        if let Some(driver) = team.drivers.first_mut() {
            driver.name = "renamed".to_string();
        }
        must(db.update_team(team.clone()).await);

        assert_eq!(must(db.get_team(team.id).await), team);
    }

    #[tokio::test]
    async fn test_update_missing_team_leaves_collection_unchanged() {
        let (db, _temp_dir) = create_test_database().await;
        must(db.add_team(Team::new("Only", ["a"])).await);
        let path = db.config().teams_path();
        let before = must(std::fs::read(&path));

        let result = db
            .update_team(Team {
                id: 99,
                name: "Ghost".to_string(),
                drivers: Vec::new(),
            })
            .await;

        assert!(matches!(result, Err(StoreError::NotFound { id: 99, .. })));
        assert_eq!(must(std::fs::read(&path)), before);
    }

    #[tokio::test]
    async fn test_delete_missing_team_is_a_no_op() {
        let (db, _temp_dir) = create_test_database().await;
        must(db.add_team(Team::new("Only", ["a"])).await);
        let path = db.config().teams_path();
        let before = must(std::fs::read(&path));

        must(db.delete_team(12345).await);

        assert_eq!(must(std::fs::read(&path)), before);
    }

    #[tokio::test]
    async fn test_get_missing_team_is_not_found() {
        let (db, _temp_dir) = create_test_database().await;

        let err = match db.get_team(7).await {
            Ok(team) => panic!("expected NotFound, got {team:?}"),
            Err(e) => e,
        };
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_deleted_ids_are_never_reused() {
        let (db, _temp_dir) = create_test_database().await;

        let first = must(db.add_team(Team::new("First", ["a"])).await);
        must(db.delete_team(first.id).await);
        let second = must(db.add_team(Team::new("Second", ["b"])).await);

        assert_eq!(second.id, 1);
        assert_eq!(second.drivers.first().map(|d| d.id), Some(1));
        assert_eq!(must(db.list_teams().await).len(), 1);
    }
}

mod event_lifecycle {
    use super::*;

    #[tokio::test]
    async fn test_event_round_trip() {
        let (db, _temp_dir) = create_test_database().await;
        let event = RaceEvent::new("Season opener", 1_700_000_000, EventType::Race)
            .with_starting_grid(vec![result(1, 0, 1, 0), result(2, 0, 0, 0)])
            .with_results(vec![result(1, 25, 0, 0), result(2, 18, 1, 0)]);

        let added = must(db.add_event(event.clone()).await);
        let loaded = must(db.get_event(added.id).await);

        assert_eq!(loaded.id, 0);
        assert_eq!(loaded.results, event.results);
        assert_eq!(loaded.starting_grid, event.starting_grid);
    }

    #[tokio::test]
    async fn test_list_preserves_insertion_order() {
        let (db, _temp_dir) = create_test_database().await;
        for name in ["one", "two", "three"] {
            must(db.add_event(RaceEvent::new(name, 0, EventType::Sprint)).await);
        }

        let names: Vec<String> = must(db.list_events().await)
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["one", "two", "three"]);
    }

    #[tokio::test]
    async fn test_delete_event() {
        let (db, _temp_dir) = create_test_database().await;
        let kept = must(db.add_event(RaceEvent::new("kept", 0, EventType::Race)).await);
        let dropped = must(db.add_event(RaceEvent::new("dropped", 0, EventType::Race)).await);

        must(db.delete_event(dropped.id).await);

        let events = must(db.list_events().await);
        assert_eq!(events.len(), 1);
        assert_eq!(events.first().map(|e| e.id), Some(kept.id));
    }

    #[tokio::test]
    async fn test_update_missing_event_is_not_found() {
        let (db, _temp_dir) = create_test_database().await;
        let mut ghost = RaceEvent::new("ghost", 0, EventType::Race);
        ghost.id = 3;

        let result = db.update_event(ghost).await;
        assert!(matches!(result, Err(StoreError::NotFound { kind: "event", id: 3 })));
    }
}

mod persistence {
    use super::*;

    #[tokio::test]
    async fn test_reopen_sees_previous_writes_and_counters() {
        let temp_dir = must(TempDir::new());
        {
            let db = must(JsonDatabase::open(StoreConfig::new(temp_dir.path())).await);
            must(db.add_team(Team::new("Persisted", ["a", "b"])).await);
            must(db.add_event(RaceEvent::new("Persisted", 0, EventType::Race)).await);
        }

        let db = must(JsonDatabase::open(StoreConfig::new(temp_dir.path())).await);
        assert_eq!(must(db.list_teams().await).len(), 1);

        let team = must(db.add_team(Team::new("Next", ["c"])).await);
        assert_eq!(team.id, 1);
        assert_eq!(team.drivers.first().map(|d| d.id), Some(2));

        let event = must(db.add_event(RaceEvent::new("Next", 0, EventType::Race)).await);
        assert_eq!(event.id, 1);
    }

    #[tokio::test]
    async fn test_in_place_writes_produce_the_same_document() {
        let atomic_dir = must(TempDir::new());
        let in_place_dir = must(TempDir::new());
        let atomic = must(JsonDatabase::open(StoreConfig::new(atomic_dir.path())).await);
        let in_place = must(
            JsonDatabase::open(StoreConfig::new(in_place_dir.path()).with_atomic_writes(false))
                .await,
        );

        for db in [&atomic, &in_place] {
            must(db.add_team(Team::new("Long team name", ["a", "b"])).await);
            must(db.delete_team(0).await);
        }

        assert_eq!(
            must(std::fs::read(atomic.config().teams_path())),
            must(std::fs::read(in_place.config().teams_path()))
        );
    }

    #[tokio::test]
    async fn test_reads_pick_up_external_changes() {
        let (db, _temp_dir) = create_test_database().await;
        must(db.add_team(Team::new("Original", ["a"])).await);

        let replacement = TeamCollection {
            teams: vec![Team {
                id: 10,
                name: "Edited by hand".to_string(),
                drivers: Vec::new(),
            }],
            ..Default::default()
        };
        must(std::fs::write(
            db.config().teams_path(),
            must(serde_json::to_vec(&replacement)),
        ));

        let teams = must(db.list_teams().await);
        assert_eq!(teams.first().map(|t| t.name.as_str()), Some("Edited by hand"));
    }

    #[tokio::test]
    async fn test_corrupt_events_do_not_affect_teams() {
        let (db, _temp_dir) = create_test_database().await;
        must(db.add_team(Team::new("Fine", ["a"])).await);
        must(std::fs::write(db.config().events_path(), b"[1, 2"));

        let err = match db.list_events().await {
            Ok(events) => panic!("expected a decode error, got {events:?}"),
            Err(e) => e,
        };
        assert!(err.is_storage_failure());
        assert_eq!(must(db.list_teams().await).len(), 1);
    }
}
