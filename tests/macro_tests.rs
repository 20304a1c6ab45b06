use tomlio::{parse, toml, write, TomlMap, TomlValue};

#[test]
fn test_macro_primitives() {
    assert_eq!(toml!(true), TomlValue::Bool(true));
    assert_eq!(toml!(false), TomlValue::Bool(false));
    assert_eq!(toml!(0), TomlValue::Integer(0));
    assert_eq!(toml!(-7), TomlValue::Integer(-7));
    assert_eq!(toml!(2.5), TomlValue::Float(2.5));
    assert_eq!(toml!("text"), TomlValue::String("text".to_string()));
}

#[test]
fn test_macro_expressions() {
    let n = 40 + 2;
    assert_eq!(toml!(n), TomlValue::Integer(42));

    let s = String::from("owned");
    assert_eq!(toml!(s), TomlValue::String("owned".to_string()));
}

#[test]
fn test_macro_arrays() {
    assert_eq!(toml!([]), TomlValue::Array(vec![]));

    let arr = toml!([1, 2, 3]);
    assert_eq!(
        arr,
        TomlValue::Array(vec![
            TomlValue::Integer(1),
            TomlValue::Integer(2),
            TomlValue::Integer(3)
        ])
    );

    // trailing comma is fine
    let arr = toml!(["a", "b",]);
    assert_eq!(
        arr,
        TomlValue::Array(vec![
            TomlValue::String("a".to_string()),
            TomlValue::String("b".to_string())
        ])
    );
}

#[test]
fn test_macro_nested_arrays() {
    let arr = toml!([[1, 2], [3, 4]]);
    match arr {
        TomlValue::Array(outer) => {
            assert_eq!(outer.len(), 2);
            assert!(outer.iter().all(TomlValue::is_array));
        }
        _ => panic!("expected an array"),
    }
}

#[test]
fn test_macro_tables() {
    assert_eq!(toml!({}), TomlValue::Table(TomlMap::new()));

    let table = toml!({
        "name" = "Alice",
        "age" = 30,
    });
    let map = table.as_table().expect("table");
    assert_eq!(map.get("name").and_then(TomlValue::as_str), Some("Alice"));
    assert_eq!(map.get("age").and_then(TomlValue::as_integer), Some(30));
}

#[test]
fn test_macro_deep_nesting() {
    let value = toml!({
        "database" = {
            "server" = "192.168.1.1",
            "ports" = [8001, 8001, 8002],
            "enabled" = true
        }
    });

    let database = value
        .as_table()
        .and_then(|t| t.get("database"))
        .and_then(TomlValue::as_table)
        .expect("database table");
    assert_eq!(
        database.get("server").and_then(TomlValue::as_str),
        Some("192.168.1.1")
    );
    assert_eq!(
        database.get("enabled").and_then(TomlValue::as_bool),
        Some(true)
    );
}

#[test]
fn test_macro_output_matches_parsed_document() {
    let built = toml!({
        "title" = "demo",
        "owner" = {
            "name" = "Tom"
        }
    });

    let parsed = parse("title = \"demo\"\n[owner]\nname = \"Tom\"\n").unwrap();
    assert_eq!(built, TomlValue::Table(parsed));
}

#[test]
fn test_macro_value_writes_cleanly() {
    let built = toml!({
        "a" = 1,
        "sub" = { "b" = 2 }
    });

    if let TomlValue::Table(table) = built {
        let text = write(&table).unwrap();
        assert!(text.contains("a = 1"));
        assert!(text.contains("[sub]"));
        assert_eq!(parse(&text).unwrap(), table);
    } else {
        panic!("expected a table");
    }
}
