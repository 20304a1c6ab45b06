//! Your first tomlio experience: parse a config, read values, write it back.
//!
//! Run with: cargo run --example simple

use tomlio::{parse, write};

fn main() {
    let text = r#"
title = "demo application"

[server]
host = "localhost"
port = 8080
tls = false

[limits]
max_connections = 1_000
timeout = 2.5
"#;

    let table = parse(text).expect("config parses");

    let server = table
        .get("server")
        .and_then(|v| v.as_table())
        .expect("server table");
    println!(
        "server: {}:{}",
        server.get("host").and_then(|v| v.as_str()).unwrap_or("?"),
        server.get("port").and_then(|v| v.as_integer()).unwrap_or(0),
    );

    let limits = table
        .get("limits")
        .and_then(|v| v.as_table())
        .expect("limits table");
    println!(
        "limits: {} connections, {}s timeout",
        limits
            .get("max_connections")
            .and_then(|v| v.as_integer())
            .unwrap_or(0),
        limits.get("timeout").and_then(|v| v.as_float()).unwrap_or(0.0),
    );

    let canonical = write(&table).expect("config writes");
    println!("\ncanonical form:\n{}", canonical);
}
