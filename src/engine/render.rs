//! Plain-text output: counts right-aligned in 3 columns.

use std::io::{self, Write};

use crate::RankedEntry;

/// One line per entry: `{count:>3} {word}\n`. Words are written as raw bytes.
pub fn write_ranked<W: Write>(out: &mut W, entries: &[RankedEntry]) -> io::Result<()> {
    for entry in entries {
        write!(out, "{:>3} ", entry.count)?;
        out.write_all(&entry.word)?;
        out.write_all(b"\n")?;
    }
    Ok(())
}

/// The total on its own line: `{total:>3}\n`.
pub fn write_total<W: Write>(out: &mut W, total: u64) -> io::Result<()> {
    writeln!(out, "{:>3}", total)
}

/// Store listing: one name per line.
pub fn write_names<W: Write>(out: &mut W, names: &[String]) -> io::Result<()> {
    for name in names {
        writeln!(out, "{name}")?;
    }
    Ok(())
}
