//
//  homebox-cli
//  output/json.rs
//
//  Copyright (c) 2025 homebox-cli contributors. All rights reserved.
//

//! # JSON Output Formatting
//!
//! Serialization helpers backing the global `--json` flag. Output goes to
//! stdout and is pretty-printed, ready for piping into `jq`.

use serde::Serialize;
use std::io::{self, Write};

/// Writes a value as pretty-printed JSON to stdout.
pub fn write_json<T: Serialize>(value: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{json}")?;
    Ok(())
}

/// Writes each element of a collection as one compact JSON object per line.
///
/// The JSON Lines shape is handy for `while read` loops and log shippers.
pub fn write_json_lines<T: Serialize>(values: &[T]) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    for value in values {
        let json = serde_json::to_string(value)?;
        writeln!(stdout, "{json}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    #[test]
    fn pretty_output_is_valid_json() {
        let value = json!({"name": "hammer", "quantity": 1});
        let rendered = serde_json::to_string_pretty(&value).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed["name"], "hammer");
    }
}
