#[cfg(test)]
mod tests {
    use sealbench_core::{
        bench::{BenchConfig, Orchestrator},
        storage::{Column, SqliteStore, StorageAdapter, StorageError, StoredRow, Table},
        strategy::{EncryptionStrategy, HybridEnvelope, StrategyKind},
        record::Record,
    };

    fn text_row(name: &str, email: &str, notes: &str) -> StoredRow {
        StoredRow::new(name.into(), email.into(), notes.into())
    }

    #[test]
    fn fresh_store_is_empty_and_reset_is_idempotent() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        for t in Table::ALL {
            store.reset(t).unwrap();
            store.reset(t).unwrap();
            assert!(store.select_all(t).unwrap().is_empty());
            assert_eq!(store.byte_size(t, t.columns()).unwrap(), 0);
        }
    }

    #[test]
    fn committed_rows_are_selected_back() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let rows = vec![text_row("ada", "ada@x.io", "first"), text_row("bob", "bob@x.io", "")];

        assert_eq!(store.insert_many(Table::Baseline, &rows[..1]).unwrap(), 1);
        assert_eq!(store.insert_many(Table::Baseline, &rows[1..]).unwrap(), 1);
        store.commit().unwrap();

        assert_eq!(store.select_all(Table::Baseline).unwrap(), rows);
        assert!(store.connection().is_autocommit());
    }

    #[test]
    fn rollback_discards_uncommitted_rows() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store.insert_many(Table::Symmetric, &[StoredRow::new(vec![1; 40], vec![2; 40], vec![3; 40])]).unwrap();
        store.rollback().unwrap();

        assert!(store.select_all(Table::Symmetric).unwrap().is_empty());
        // Nothing pending: both are no-ops.
        store.rollback().unwrap();
        store.commit().unwrap();
    }

    #[test]
    fn text_size_counts_octets_not_characters() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store.insert_many(Table::Baseline, &[text_row("é", "a@b", ""), text_row("日本", "", "ok")]).unwrap();
        store.commit().unwrap();

        let t = Table::Baseline;
        assert_eq!(store.byte_size(t, &[Column::Name]).unwrap(), 2 + 6);
        assert_eq!(store.byte_size(t, t.columns()).unwrap(), 2 + 3 + 6 + 2);
        assert_eq!(store.byte_size(t, &[]).unwrap(), 0);
    }

    #[test]
    fn baseline_rejects_non_utf8() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let bad = StoredRow::new(vec![0xFF], b"a".to_vec(), b"b".to_vec());
        let err = store.insert_many(Table::Baseline, &[bad]).unwrap_err();
        assert!(matches!(err, StorageError::NotText { table: Table::Baseline, column: "name" }));
        store.rollback().unwrap();
        assert!(store.select_all(Table::Baseline).unwrap().is_empty());
    }

    #[test]
    fn hybrid_rows_survive_the_store() {
        let strategy = HybridEnvelope::generate(1024).unwrap();
        let record = Record::new("Grace Hopper", "grace@navy.mil", "COBOL.");
        let row = strategy.protect(&record).unwrap();

        let mut store = SqliteStore::open_in_memory().unwrap();
        store.insert_many(Table::Hybrid, std::slice::from_ref(&row)).unwrap();
        store.commit().unwrap();

        let back = store.select_all(Table::Hybrid).unwrap();
        assert_eq!(back, vec![row.clone()]);
        assert_eq!(strategy.reveal(&back[0]).unwrap(), record);
        assert_eq!(
            store.byte_size(Table::Hybrid, Table::Hybrid.columns()).unwrap(),
            row.byte_len(Table::Hybrid.columns())
        );
    }

    #[test]
    fn full_run_against_sqlite() {
        let config = BenchConfig::default()
            .with_batch_sizes(vec![5, 10])
            .with_chunk_size(3)
            .with_wrap_key_bits(1024)
            .with_seed(7);
        let store = SqliteStore::open_in_memory().unwrap();
        let mut orch = Orchestrator::with_synthetic(config, store).unwrap();
        let table = orch.run().unwrap();

        assert_eq!(table.len(), 6);
        assert_eq!(table.batch_sizes(), vec![5, 10]);
        for r in &table {
            assert!(r.sanity_check(), "{} at {}", r.strategy, r.batch_size);
            assert_eq!(r.skipped(), 0);
        }
        for n in [5, 10] {
            let size = |k| table.get(k, n).unwrap().storage_bytes;
            assert!(size(StrategyKind::HybridEnvelope) > size(StrategyKind::SymmetricAead));
            assert!(size(StrategyKind::SymmetricAead) > size(StrategyKind::Plaintext));
        }

        let store = orch.store_mut();
        for t in Table::ALL {
            assert!(store.select_all(t).unwrap().is_empty(), "{t} not reset");
        }
    }
}
