#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use sealbench_core::{
        constants::FIELD_HEADER_LEN,
        crypto::{EncodedField, KeyWrapper, RevealError},
        record::Record,
        strategy::{EncryptionStrategy, HybridEnvelope, Plaintext, StrategyKind, SymmetricAead},
    };

    fn scenario() -> Vec<Record> {
        vec![
            Record::new("Alice", "a@x.com", "hi"),
            Record::new("Bob", "b@x.com", "yo"),
            Record::new("Cy", "c@x.com", "ok"),
        ]
    }

    fn hybrid_1024() -> HybridEnvelope {
        HybridEnvelope::generate(1024).expect("keygen")
    }

    #[test]
    fn every_strategy_roundtrips() {
        let strategies: Vec<Box<dyn EncryptionStrategy>> = vec![
            Box::new(Plaintext),
            Box::new(SymmetricAead::generate()),
            Box::new(hybrid_1024()),
        ];
        let mut records = scenario();
        records.push(Record::new("Zoë Ångström", "zoë@例え.jp", ""));

        for s in &strategies {
            for r in &records {
                let row = s.protect(r).unwrap();
                assert_eq!(&s.reveal(&row).unwrap(), r, "{} failed roundtrip", s.kind());
            }
        }
    }

    #[test]
    fn plaintext_is_identity_on_bytes() {
        let r = Record::new("Alice", "a@x.com", "hi");
        let row = Plaintext.protect(&r).unwrap();
        assert_eq!(row.name, b"Alice");
        assert_eq!(row.email, b"a@x.com");
        assert_eq!(row.notes, b"hi");
        assert!(row.wrapped_key.is_none());
    }

    #[test]
    fn symmetric_scenario_produces_nine_fields_with_distinct_nonces() {
        let s = SymmetricAead::generate();
        let rows: Vec<_> = scenario().iter().map(|r| s.protect(r).unwrap()).collect();

        let fields: Vec<&[u8]> = rows.iter().flat_map(|r| r.fields()).collect();
        assert_eq!(fields.len(), 9);
        assert!(fields.iter().all(|f| f.len() >= FIELD_HEADER_LEN + 1));

        let nonces: HashSet<[u8; 16]> =
            fields.iter().map(|f| *EncodedField::parse(f).unwrap().nonce).collect();
        assert_eq!(nonces.len(), 9);
        assert!(rows.iter().all(|r| r.wrapped_key.is_none()));
    }

    #[test]
    fn hybrid_scenario_wraps_distinct_keys_of_modulus_length() {
        let s = HybridEnvelope::generate(2048).expect("keygen");
        assert_eq!(s.wrapped_key_len(), 256);

        let rows: Vec<_> = scenario().iter().map(|r| s.protect(r).unwrap()).collect();
        let wrapped: Vec<&Vec<u8>> = rows.iter().map(|r| r.wrapped_key.as_ref().unwrap()).collect();

        assert!(wrapped.iter().all(|w| w.len() == 256));
        let distinct: HashSet<&Vec<u8>> = wrapped.iter().copied().collect();
        assert_eq!(distinct.len(), 3);

        for (row, record) in rows.iter().zip(scenario()) {
            assert!(row.fields().iter().all(|f| f.len() >= FIELD_HEADER_LEN + 1));
            assert_eq!(s.reveal(row).unwrap(), record);
        }
    }

    #[test]
    fn hybrid_record_keys_are_not_interchangeable() {
        // A field moved to another row is authenticated against the wrong key.
        let s = hybrid_1024();
        let a = s.protect(&Record::new("Alice", "a@x.com", "hi")).unwrap();
        let mut b = s.protect(&Record::new("Bob", "b@x.com", "yo")).unwrap();
        b.name = a.name.clone();
        assert_eq!(s.reveal(&b), Err(RevealError::Authentication));
    }

    #[test]
    fn tampered_symmetric_field_is_authentication_error() {
        let s = SymmetricAead::generate();
        let mut row = s.protect(&Record::new("Alice", "a@x.com", "hi")).unwrap();
        let last = row.notes.len() - 1;
        row.notes[last] ^= 0x01;
        assert_eq!(s.reveal(&row), Err(RevealError::Authentication));
    }

    #[test]
    fn symmetric_rows_do_not_open_under_a_new_run_key() {
        let first = SymmetricAead::generate();
        let row = first.protect(&Record::new("Alice", "a@x.com", "hi")).unwrap();
        let second = SymmetricAead::generate();
        assert_eq!(second.reveal(&row), Err(RevealError::Authentication));
    }

    #[test]
    fn tampered_wrapped_key_is_key_unwrap_error() {
        let s = hybrid_1024();
        let mut row = s.protect(&Record::new("Alice", "a@x.com", "hi")).unwrap();
        if let Some(w) = row.wrapped_key.as_mut() {
            w[10] ^= 0x80;
        }
        assert_eq!(s.reveal(&row), Err(RevealError::KeyUnwrap));
    }

    #[test]
    fn wrapped_key_from_another_pair_is_key_unwrap_error() {
        let producer = hybrid_1024();
        let consumer = hybrid_1024();
        let row = producer.protect(&Record::new("Alice", "a@x.com", "hi")).unwrap();
        assert_eq!(consumer.reveal(&row), Err(RevealError::KeyUnwrap));
    }

    #[test]
    fn tampered_hybrid_field_is_authentication_error() {
        let s = hybrid_1024();
        let mut row = s.protect(&Record::new("Alice", "a@x.com", "hi")).unwrap();
        row.email[20] ^= 0x04;
        assert_eq!(s.reveal(&row), Err(RevealError::Authentication));
    }

    #[test]
    fn missing_wrapped_key_and_short_fields_are_malformed() {
        let s = hybrid_1024();
        let mut row = s.protect(&Record::new("Alice", "a@x.com", "hi")).unwrap();

        let mut no_key = row.clone();
        no_key.wrapped_key = None;
        assert!(matches!(s.reveal(&no_key), Err(RevealError::MalformedEncoding { .. })));

        row.name.truncate(10);
        assert_eq!(
            s.reveal(&row),
            Err(RevealError::MalformedEncoding { len: 10, min: FIELD_HEADER_LEN })
        );
    }

    #[test]
    fn short_symmetric_field_is_malformed() {
        let s = SymmetricAead::generate();
        let mut row = s.protect(&Record::new("Alice", "a@x.com", "hi")).unwrap();
        row.email = vec![0u8; 5];
        assert_eq!(
            s.reveal(&row),
            Err(RevealError::MalformedEncoding { len: 5, min: FIELD_HEADER_LEN })
        );
    }

    #[test]
    fn plaintext_rejects_non_utf8() {
        let mut row = Plaintext.protect(&Record::new("Alice", "a@x.com", "hi")).unwrap();
        row.notes = vec![0xC3, 0x28];
        assert_eq!(Plaintext.reveal(&row), Err(RevealError::InvalidText));
    }

    #[test]
    fn wrapper_roundtrips_key_and_reports_length() {
        let w = KeyWrapper::generate(1024).unwrap();
        let key = [0x5Au8; 32];
        let wrapped = w.wrap_key(&key).unwrap();
        assert_eq!(wrapped.len(), w.wrapped_len());
        assert_eq!(*w.unwrap_key(&wrapped).unwrap(), key);
        assert!(matches!(w.unwrap_key(&wrapped[1..]), Err(RevealError::KeyUnwrap)));
    }

    #[test]
    fn kinds_map_to_tables_in_fixed_order() {
        let labels: Vec<_> = StrategyKind::ALL.iter().map(|k| k.table().name()).collect();
        assert_eq!(labels, ["baseline", "symmetric", "hybrid"]);
        for kind in StrategyKind::ALL {
            let s = kind.instantiate(1024).unwrap();
            assert_eq!(s.kind(), kind);
        }
    }
}
