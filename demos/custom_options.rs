//! Customizing the reader and writer: lenient bare keys, indentation.
//!
//! Run with: cargo run --example custom_options

use tomlio::{parse, parse_with_options, write_with_options, BareKeys, TomlOptions};

fn main() {
    // strict mode (the default) rejects '.' in bare keys
    let strict = parse("log.level = \"debug\"");
    println!("strict mode: {:?}", strict.err().map(|e| e.to_string()));

    // lenient mode accepts the key verbatim
    let options = TomlOptions::new().with_bare_keys(BareKeys::Lenient);
    let table = parse_with_options("log.level = \"debug\"", options).expect("lenient parse");
    println!(
        "lenient mode: log.level = {:?}",
        table.get("log.level").and_then(|v| v.as_str())
    );

    // nested tables can be indented with spaces instead of tabs
    let table = parse("[outer]\nname = \"o\"\n[outer.inner]\nname = \"i\"\n").expect("parses");
    let options = TomlOptions::new().with_indent(4).with_indent_spaces(true);
    let text = write_with_options(&table, options).expect("writes");
    println!("indented output:\n{}", text);
}
