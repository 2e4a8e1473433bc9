//! Property-based tests for ID allocation through the store

use std::collections::HashSet;

use pitwall_store::prelude::*;
use proptest::prelude::*;
use tempfile::TempDir;

#[derive(Debug, Clone)]
enum Op {
    Add,
    DeleteNth(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => Just(Op::Add),
        1 => (0usize..8).prop_map(Op::DeleteNth),
    ]
}

fn run_ops(ops: &[Op]) -> Result<Vec<u64>, StoreError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| StoreError::write_failed("runtime", e))?;
    let temp_dir = TempDir::new().map_err(|e| StoreError::write_failed("tempdir", e))?;

    runtime.block_on(async {
        let db = JsonDatabase::open(StoreConfig::new(temp_dir.path())).await?;
        let mut allocated = Vec::new();

        for op in ops {
            match op {
                Op::Add => {
                    let event = db
                        .add_event(RaceEvent::new("event", 0, EventType::Race))
                        .await?;
                    allocated.push(event.id);
                }
                Op::DeleteNth(n) => {
                    let live = db.list_events().await?;
                    let id = live.get(*n).map_or(u64::MAX, |e| e.id);
                    db.delete_event(id).await?;
                }
            }
        }

        Ok(allocated)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn test_ids_strictly_increase_and_never_repeat(
        ops in proptest::collection::vec(op_strategy(), 1..24)
    ) {
        let allocated = run_ops(&ops);
        prop_assert!(allocated.is_ok(), "store operation failed: {:?}", allocated);
        let allocated = allocated.unwrap_or_default();

        let unique: HashSet<u64> = allocated.iter().copied().collect();
        prop_assert_eq!(unique.len(), allocated.len());
        prop_assert!(allocated.windows(2).all(|w| matches!(w, [a, b] if a < b)));
    }
}
