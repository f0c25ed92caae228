//! Command handlers: build queries from CLI arguments, call the client and
//! print the result.

pub mod entities;
pub mod games;
pub mod stats;

use crate::asa::types::Table;
use crate::error::Result;

/// Print a result table as pretty JSON on stdout.
pub fn print_table(table: &Table) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(table)?);
    Ok(())
}
