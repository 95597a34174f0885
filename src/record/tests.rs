// ═══════════════════════════════════════════════════════════════════════
// Helpers
// ═══════════════════════════════════════════════════════════════════════
mod record_tests {
    use crate::error::{ErrorKind, RecordError};
    use crate::record::{Record, RecordType};
    use crate::types::Key;
    use crate::value::{Value, ValueMap};
    use crate::values;
    use std::collections::HashSet;

    fn customer_type() -> RecordType {
        RecordType::new(["name", "address", "zip"]).unwrap()
    }

    fn make_customer(t: &RecordType) -> Record {
        t.construct(values!["Alex", "Some street", 5555]).unwrap()
    }

    /// `o = T.new(T.new({b: [1, 2, 3]}))` with `T = Factory.new(:a)`.
    fn make_nested() -> Record {
        let t = RecordType::new(["a"]).unwrap();
        let mut map = ValueMap::new();
        map.insert("b".into(), Value::from(values![1, 2, 3]));
        let inner = t.construct([Value::Map(map)]).unwrap();
        t.construct([Value::from(inner)]).unwrap()
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Definition
    // ═══════════════════════════════════════════════════════════════════════

    #[test]
    fn test_members_match_definition() {
        let t = customer_type();
        let r = make_customer(&t);
        assert_eq!(r.members(), ["name", "address", "zip"]);
        assert_eq!(t.members(), r.members());
    }

    #[test]
    fn test_empty_field_list() {
        let err = RecordType::new(Vec::<&str>::new()).unwrap_err();
        assert_eq!(err, RecordError::NoFields);
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_duplicate_field() {
        let err = RecordType::new(["a", "b", "a"]).unwrap_err();
        assert_eq!(err, RecordError::DuplicateField("a".into()));
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_invalid_field_name() {
        for bad in ["", "1st", "with space", "dash-ed"] {
            let err = RecordType::new(["ok", bad]).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::NameError, "field {bad:?}");
        }
        assert!(RecordType::new(["_private", "Capital", "a1"]).is_ok());
    }

    #[test]
    fn test_named_type() {
        let t = RecordType::named("Customer", ["name"]).unwrap();
        assert_eq!(t.name(), Some("Customer"));

        let err = RecordType::named("customer", ["name"]).unwrap_err();
        assert_eq!(err, RecordError::InvalidTypeName("customer".into()));
        assert_eq!(err.kind(), ErrorKind::NameError);
    }

    #[test]
    fn test_type_identity_is_not_structural() {
        let a = customer_type();
        let b = customer_type();
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
        assert!(a.same_type(&a.clone()));
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Construction
    // ═══════════════════════════════════════════════════════════════════════

    #[test]
    fn test_construct_without_values() {
        let t = customer_type();
        let r = t.construct(values![]).unwrap();
        assert_eq!(r.len(), 3);
        assert!(r.iter().all(Value::is_nil));
        assert!(t.construct_empty().strict_equals(&r));
    }

    #[test]
    fn test_construct_partial_values() {
        let t = customer_type();
        let r = t.construct(values!["Alex"]).unwrap();
        assert_eq!(r.get("name").unwrap().as_str(), Some("Alex"));
        assert!(r.get("address").unwrap().is_nil());
        assert!(r.get("zip").unwrap().is_nil());
    }

    #[test]
    fn test_construct_too_many_values() {
        let t = customer_type();
        let err = t
            .construct(values!["Alex", "Some street", 1111, "some info"])
            .unwrap_err();
        assert_eq!(err, RecordError::TooManyValues { given: 4, expected: 3 });
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    // ═══════════════════════════════════════════════════════════════════════
    // get
    // ═══════════════════════════════════════════════════════════════════════

    #[test]
    fn test_get_by_name_and_index() {
        let r = make_customer(&customer_type());
        assert_eq!(r.get("name").unwrap(), &Value::from("Alex"));
        assert_eq!(r.get(String::from("name")).unwrap(), &Value::from("Alex"));
        assert_eq!(r.get(0).unwrap(), &Value::from("Alex"));
        assert_eq!(r.get(-3).unwrap(), &Value::from("Alex"));
        assert_eq!(r.get(-1).unwrap(), &Value::from(5555));
        assert_eq!(r.get(2usize).unwrap(), &Value::from(5555));
    }

    #[test]
    fn test_index_and_name_agree() {
        let t = customer_type();
        let r = make_customer(&t);
        for (i, name) in t.members().iter().enumerate() {
            assert_eq!(r.get(i).unwrap(), r.get(name).unwrap());
        }
    }

    #[test]
    fn test_get_unknown_name() {
        let r = make_customer(&customer_type());
        let err = r.get("info").unwrap_err();
        assert_eq!(err, RecordError::UnknownField("info".into()));
        assert_eq!(err.kind(), ErrorKind::NameError);
    }

    #[test]
    fn test_get_out_of_range() {
        let r = make_customer(&customer_type());
        for index in [3, 4, -4, i32::MAX, i32::MIN] {
            let err = r.get(index).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::IndexError, "index {index}");
        }
        assert_eq!(
            r.get(4).unwrap_err(),
            RecordError::IndexOutOfRange { index: 4, len: 3 }
        );
        assert_eq!(r.get(usize::MAX).unwrap_err().kind(), ErrorKind::IndexError);
    }

    #[test]
    fn test_get_unsupported_key() {
        let r = make_customer(&customer_type());
        for key in [Value::Nil, Value::from(1.0), Value::from(values![0]), Value::from(true)] {
            let err = r.get(&key).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::TypeError, "key {key:?}");
        }
        assert_eq!(
            r.get(&Value::from(1.5)).unwrap_err(),
            RecordError::UnsupportedKey("Float")
        );
        // Values holding an integer or a string are ordinary keys.
        assert_eq!(r.get(&Value::from(1)).unwrap().as_str(), Some("Some street"));
        assert_eq!(r.get(&Value::from("zip")).unwrap().as_i64(), Some(5555));
    }

    // ═══════════════════════════════════════════════════════════════════════
    // set
    // ═══════════════════════════════════════════════════════════════════════

    #[test]
    fn test_set_by_name_and_index() {
        let mut r = make_customer(&customer_type());
        r.set("name", "Bob").unwrap();
        assert_eq!(r.get("name").unwrap().as_str(), Some("Bob"));

        r.set(-1, 1234).unwrap();
        assert_eq!(r.get("zip").unwrap().as_i64(), Some(1234));

        r.set(1, Value::Nil).unwrap();
        assert!(r.get(1).unwrap().is_nil());
        assert_eq!(r.len(), 3);
    }

    #[test]
    fn test_set_errors() {
        let mut r = make_customer(&customer_type());
        assert_eq!(r.set("info", "x").unwrap_err().kind(), ErrorKind::NameError);
        assert_eq!(r.set(4, "x").unwrap_err().kind(), ErrorKind::IndexError);
        assert_eq!(
            r.set(&Value::from(0.5), "x").unwrap_err().kind(),
            ErrorKind::TypeError
        );
        // Failed writes leave the record untouched.
        assert!(r.strict_equals(&make_customer(r.record_type())));
    }

    #[test]
    fn test_replace_and_get_mut() {
        let mut r = make_customer(&customer_type());
        let old = r.replace("zip", 1111).unwrap();
        assert_eq!(old, Value::from(5555));

        if let Value::Str(s) = r.get_mut("name").unwrap() {
            *s = "Alexander".into();
        }
        assert_eq!(r.get(0).unwrap().as_str(), Some("Alexander"));
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Accessors
    // ═══════════════════════════════════════════════════════════════════════

    #[test]
    fn test_accessor_read_write() {
        let t = customer_type();
        let zip = t.accessor("zip").unwrap();
        assert_eq!(zip.index(), 2);

        let mut r = make_customer(&t);
        assert_eq!(r.read(&zip).unwrap().as_i64(), Some(5555));
        r.write(&zip, 4242).unwrap();
        assert_eq!(r.get("zip").unwrap().as_i64(), Some(4242));
    }

    #[test]
    fn test_accessor_unknown_field() {
        let err = customer_type().accessor("info").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NameError);
    }

    #[test]
    fn test_foreign_accessor() {
        let a = customer_type();
        let b = customer_type();
        let zip = a.accessor("zip").unwrap();
        let mut r = make_customer(&b);

        assert_eq!(r.read(&zip).unwrap_err(), RecordError::ForeignAccessor);
        assert_eq!(r.write(&zip, 1).unwrap_err().kind(), ErrorKind::TypeError);
    }

    #[test]
    fn test_accessor_outlives_dropped_type() {
        for _ in 0..100 {
            let a = RecordType::new(["a", "b", "c"]).unwrap();
            let c = a.accessor("c").unwrap();
            drop(a);

            let b = RecordType::new(["x", "y", "z"]).unwrap();
            let mut r = b.construct(values![1, 2, 3]).unwrap();
            assert_eq!(r.read(&c).unwrap_err(), RecordError::ForeignAccessor);
            assert_eq!(r.write(&c, 9).unwrap_err(), RecordError::ForeignAccessor);
            assert_eq!(r.get("z").unwrap().as_i64(), Some(3));
            assert!(!c.record_type().same_type(&b));
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Iteration
    // ═══════════════════════════════════════════════════════════════════════

    #[test]
    fn test_iter_in_field_order() {
        let r = make_customer(&customer_type());
        let collected: Vec<&Value> = r.iter().collect();
        assert_eq!(collected.len(), 3);
        for (i, v) in collected.into_iter().enumerate() {
            assert_eq!(v, r.get(i).unwrap());
        }
        assert_eq!(r.iter().len(), 3);
    }

    #[test]
    fn test_iter_is_restartable_and_lazy() {
        let r = make_customer(&customer_type());
        let mut it = r.iter();
        assert_eq!(it.next().unwrap().as_str(), Some("Alex"));
        let rest = it.clone();
        assert_eq!(it.len(), 2);
        assert_eq!(rest.count(), 2);
        // A fresh call starts from the beginning again.
        assert_eq!(r.iter().next().unwrap().as_str(), Some("Alex"));
        assert_eq!((&r).into_iter().count(), 3);
    }

    #[test]
    fn test_each_runs_handler() {
        let r = make_customer(&customer_type());
        let mut i = 0;
        let returned = r.each(|v| {
            assert_eq!(v, r.get(i).unwrap());
            i += 1;
        });
        assert_eq!(i, 3);
        assert!(std::ptr::eq(returned, &r));
    }

    #[test]
    fn test_pairs_and_each_pair() {
        let r = make_customer(&customer_type());
        let names: Vec<&str> = r.pairs().map(|(k, _)| k.as_str()).collect();
        assert_eq!(names, ["name", "address", "zip"]);

        let mut seen = 0;
        r.each_pair(|k, v| {
            assert_eq!(v, r.get(k).unwrap());
            seen += 1;
        });
        assert_eq!(seen, 3);
        assert_eq!(r.pairs().len(), 3);
    }

    #[test]
    fn test_select() {
        let r = make_customer(&customer_type());
        let strings = r.select(|v| v.as_str().is_some());
        assert_eq!(strings, [&Value::from("Alex"), &Value::from("Some street")]);
        assert!(r.select(|v| v.is_nil()).is_empty());
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Conversions
    // ═══════════════════════════════════════════════════════════════════════

    #[test]
    fn test_to_array() {
        let r = make_customer(&customer_type());
        assert_eq!(r.to_array(), values!["Alex", "Some street", 5555]);
        assert_eq!(r.values(), r.to_array());
        assert_eq!(r.size(), 3);
        assert!(!r.is_empty());
    }

    #[test]
    fn test_to_map_preserves_field_order() {
        let r = make_customer(&customer_type());
        let map = r.to_map();
        let keys: Vec<&str> = map.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, ["name", "address", "zip"]);
        assert_eq!(map["name"], Value::from("Alex"));
        assert_eq!(map["address"], Value::from("Some street"));
        assert_eq!(map["zip"], Value::from(5555));
    }

    #[test]
    fn test_map_round_trip() {
        let t = customer_type();
        let r = make_customer(&t);
        let rebuilt = t.construct(r.to_map().into_values()).unwrap();
        assert!(rebuilt.equals(&r));
        assert_eq!(rebuilt, r);
        assert_eq!(t.construct(r.clone().into_values()).unwrap(), r);
    }

    #[test]
    fn test_values_at() {
        let r = make_customer(&customer_type());
        let vals = r.values_at([0, 1]).unwrap();
        assert_eq!(vals, [&Value::from("Alex"), &Value::from("Some street")]);
        assert_eq!(r.values_at([-1]).unwrap(), [&Value::from(5555)]);
        assert!(r.values_at(Vec::<i32>::new()).unwrap().is_empty());
        assert_eq!(r.values_at([0, 7]).unwrap_err().kind(), ErrorKind::IndexError);
    }

    #[test]
    fn test_json_export() {
        let r = make_customer(&customer_type());
        let json = serde_json::to_string(&r).unwrap();
        assert_eq!(json, r#"{"name":"Alex","address":"Some street","zip":5555}"#);

        let value: serde_json::Value = Value::from(r).into();
        assert_eq!(value["zip"], serde_json::json!(5555));
    }

    // ═══════════════════════════════════════════════════════════════════════
    // dig
    // ═══════════════════════════════════════════════════════════════════════

    #[test]
    fn test_dig_nested_value() {
        let o = make_nested();
        let found = o.dig("a", &[Key::Name("a"), Key::Name("b")]).unwrap();
        assert_eq!(found, Some(&Value::from(values![1, 2, 3])));

        let found = o.dig("a", &[Key::Name("a"), Key::Name("b"), Key::Index(-1)]).unwrap();
        assert_eq!(found, Some(&Value::from(3)));
    }

    #[test]
    fn test_dig_missing_returns_none() {
        let o = make_nested();
        assert_eq!(o.dig("b", &[Key::Index(0)]).unwrap(), None);
        assert_eq!(o.dig("a", &[Key::Name("a"), Key::Name("c")]).unwrap(), None);
        assert_eq!(o.dig("a", &[Key::Name("a"), Key::Name("b"), Key::Index(5)]).unwrap(), None);
        assert_eq!(o.dig("a", &[Key::Name("zz")]).unwrap(), None);
    }

    #[test]
    fn test_dig_through_nil() {
        let t = RecordType::new(["a", "b"]).unwrap();
        let r = t.construct(values![1]).unwrap();
        assert_eq!(r.dig("b", &[Key::Name("x"), Key::Index(0)]).unwrap(), None);
    }

    #[test]
    fn test_dig_nil_at_last_hop() {
        let t = RecordType::new(["a", "b"]).unwrap();
        let r = t.construct(values![values![1, Value::Nil]]).unwrap();
        assert_eq!(r.dig("b", &[]).unwrap(), None);
        assert_eq!(r.dig("a", &[Key::Index(1)]).unwrap(), None);
        assert_eq!(r.dig("a", &[Key::Index(0)]).unwrap(), Some(&Value::from(1)));
    }

    #[test]
    fn test_dig_without_path() {
        let r = make_customer(&customer_type());
        assert_eq!(r.dig("zip", &[]).unwrap(), Some(&Value::from(5555)));
    }

    #[test]
    fn test_dig_first_key_must_be_name() {
        let o = make_nested();
        let err = o.dig(1, &[Key::Name("b")]).unwrap_err();
        assert_eq!(err, RecordError::InvalidDigKey("1".into()));
        assert_eq!(err.kind(), ErrorKind::TypeError);

        let err = o.dig(&Value::from(1.5), &[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeError);
    }

    #[test]
    fn test_dig_into_scalar() {
        let r = make_customer(&customer_type());
        let err = r.dig("name", &[Key::Name("x")]).unwrap_err();
        assert_eq!(err, RecordError::NotDiggable("String"));
        assert_eq!(err.kind(), ErrorKind::TypeError);
    }

    #[test]
    fn test_dig_array_with_name() {
        let t = RecordType::new(["list"]).unwrap();
        let r = t.construct([Value::from(values![1, 2])]).unwrap();
        assert_eq!(
            r.dig("list", &[Key::Name("x")]).unwrap_err().kind(),
            ErrorKind::TypeError
        );
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Equality / hash
    // ═══════════════════════════════════════════════════════════════════════

    #[test]
    fn test_equals_same_values() {
        let t = customer_type();
        let a = make_customer(&t);
        let b = make_customer(&t);
        assert!(a.equals(&b));
        assert!(a.strict_equals(&b));
        assert_eq!(a, b);
    }

    #[test]
    fn test_equals_different_values() {
        let t = customer_type();
        let a = make_customer(&t);
        let b = t.construct(values!["Alexander", "Some street", 5555]).unwrap();
        assert!(!a.equals(&b));
        assert!(!a.strict_equals(&b));
    }

    #[test]
    fn test_equals_other_type_never() {
        let a = make_customer(&customer_type());
        let b = make_customer(&customer_type());
        assert!(!a.equals(&b));
        assert!(!a.strict_equals(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn test_loose_vs_strict_numeric() {
        let t = customer_type();
        let a = make_customer(&t);
        let b = t.construct(values!["Alex", "Some street", 5555.0]).unwrap();
        assert!(a.equals(&b));
        assert!(!a.strict_equals(&b));
        assert_ne!(a.hash_code(), b.hash_code());
    }

    #[test]
    fn test_hash_consistency() {
        let t = customer_type();
        let a = make_customer(&t);
        let b = make_customer(&t);
        assert_eq!(a.hash_code(), b.hash_code());

        let mut set = HashSet::new();
        set.insert(a.clone());
        assert!(set.contains(&b));
        assert!(!set.insert(b));

        let other = t.construct(values!["Bob"]).unwrap();
        assert!(set.insert(other));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_hash_follows_mutation() {
        let t = customer_type();
        let mut a = make_customer(&t);
        let before = a.hash_code();
        a.set("zip", 1).unwrap();
        assert_ne!(before, a.hash_code());
        a.set("zip", 5555).unwrap();
        assert_eq!(before, a.hash_code());
    }

    #[test]
    fn test_hash_matches_map_digest() {
        let r = make_customer(&customer_type());
        assert_eq!(r.hash_code(), crate::digest::digest_map(&r.to_map()));
    }

    #[test]
    fn test_nested_record_equality() {
        let o = make_nested();
        assert_eq!(o, o.clone());
        // Distinct definitions of the inner type make the outer records unequal.
        assert_ne!(make_nested(), make_nested());
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Rendering
    // ═══════════════════════════════════════════════════════════════════════

    #[test]
    fn test_to_string_anonymous() {
        let r = make_customer(&customer_type());
        assert_eq!(
            r.to_string(),
            "#<factory  name=\"Alex\", address=\"Some street\", zip=5555>"
        );
        assert_eq!(format!("{:?}", r), r.to_string());
    }

    #[test]
    fn test_to_string_named() {
        let t = RecordType::named("Customer", ["name", "zip"]).unwrap();
        let r = t.construct(values!["Alex"]).unwrap();
        assert_eq!(r.to_string(), "#<factory Customer name=\"Alex\", zip=nil>");
    }

    #[test]
    fn test_to_string_nested() {
        let o = make_nested();
        assert_eq!(o.to_string(), "#<factory  a=#<factory  a={b: [1, 2, 3]}>>");
    }
}
