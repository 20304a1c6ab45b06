#[macro_export]
macro_rules! toml {
    // Handle true
    (true) => {
        $crate::TomlValue::Bool(true)
    };

    // Handle false
    (false) => {
        $crate::TomlValue::Bool(false)
    };

    // Handle empty array
    ([]) => {
        $crate::TomlValue::Array(vec![])
    };

    // Handle non-empty array
    ([ $($elem:tt),* $(,)? ]) => {
        $crate::TomlValue::Array(vec![$($crate::toml!($elem)),*])
    };

    // Handle empty table
    ({}) => {
        $crate::TomlValue::Table($crate::TomlMap::new())
    };

    // Handle non-empty table, with TOML's `key = value` syntax
    ({ $($key:literal = $value:tt),* $(,)? }) => {{
        let mut table = $crate::TomlMap::new();
        $(
            table.insert($key.to_string(), $crate::toml!($value));
        )*
        $crate::TomlValue::Table(table)
    }};

    // Fallback: anything convertible into a value
    ($other:expr) => {
        $crate::TomlValue::from($other)
    };
}

#[cfg(test)]
mod tests {
    use crate::{TomlMap, TomlValue};

    #[test]
    fn test_toml_macro_primitives() {
        assert_eq!(toml!(true), TomlValue::Bool(true));
        assert_eq!(toml!(false), TomlValue::Bool(false));
        assert_eq!(toml!(42), TomlValue::Integer(42));
        assert_eq!(toml!(3.5), TomlValue::Float(3.5));
        assert_eq!(toml!("hello"), TomlValue::String("hello".to_string()));
    }

    #[test]
    fn test_toml_macro_arrays() {
        assert_eq!(toml!([]), TomlValue::Array(vec![]));

        let arr = toml!([1, 2, 3]);
        match arr {
            TomlValue::Array(vec) => {
                assert_eq!(vec.len(), 3);
                assert_eq!(vec[0], TomlValue::Integer(1));
                assert_eq!(vec[1], TomlValue::Integer(2));
                assert_eq!(vec[2], TomlValue::Integer(3));
            }
            _ => panic!("Expected array"),
        }
    }

    #[test]
    fn test_toml_macro_tables() {
        assert_eq!(toml!({}), TomlValue::Table(TomlMap::new()));

        let table = toml!({
            "name" = "Alice",
            "age" = 30
        });

        match table {
            TomlValue::Table(map) => {
                assert_eq!(map.len(), 2);
                assert_eq!(map.get("name"), Some(&TomlValue::String("Alice".to_string())));
                assert_eq!(map.get("age"), Some(&TomlValue::Integer(30)));
            }
            _ => panic!("Expected table"),
        }
    }

    #[test]
    fn test_toml_macro_nested() {
        let value = toml!({
            "server" = {
                "host" = "localhost",
                "ports" = [8001, 8002]
            }
        });

        let server = value
            .as_table()
            .and_then(|t| t.get("server"))
            .and_then(TomlValue::as_table)
            .expect("server table");
        assert_eq!(
            server.get("host"),
            Some(&TomlValue::String("localhost".to_string()))
        );
        assert_eq!(
            server.get("ports"),
            Some(&TomlValue::Array(vec![
                TomlValue::Integer(8001),
                TomlValue::Integer(8002)
            ]))
        );
    }
}
