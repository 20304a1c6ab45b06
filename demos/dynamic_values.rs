//! Building TOML documents programmatically with TomlValue and the toml! macro.
//!
//! Run with: cargo run --example dynamic_values

use tomlio::{toml, write, TomlMap, TomlValue};

fn main() {
    // piece by piece...
    let mut server = TomlMap::new();
    server.insert("host".to_string(), TomlValue::from("0.0.0.0"));
    server.insert("port".to_string(), TomlValue::from(9000));

    let mut root = TomlMap::new();
    root.insert("title".to_string(), TomlValue::from("generated"));
    root.insert("server".to_string(), TomlValue::Table(server));

    println!("built by hand:\n{}", write(&root).expect("writes"));

    // ...or with the macro
    let value = toml!({
        "title" = "generated",
        "features" = ["parser", "writer", "serde"],
        "server" = {
            "host" = "0.0.0.0",
            "port" = 9000
        }
    });

    if let TomlValue::Table(table) = value {
        println!("built with toml!:\n{}", write(&table).expect("writes"));
    }
}
