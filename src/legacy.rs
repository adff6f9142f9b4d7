//! Byte-exact output of the old table dumper script.
//!
//! Tables that were generated with the script can be regenerated with this module and diffed
//! without noise. New code should use [`Layout`](../struct.Layout.html) instead, the old
//! output has a few rough edges:
//!
//! - a value that starts a line always gets a trailing comma, even if it's the last one
//! - when the last line is partial, an extra newline is written before the closing brace,
//!   whether or not the last value already ended the line
//!
//! ```
//! use hexarray::legacy;
//!
//! assert_eq!(legacy::to_string(&[0u8, 1, 2], 2, 0).unwrap(), "{\n\t0x00, 0x01,\n\t0x02,\n}");
//! assert_eq!(hexarray::dump(&[0u8, 1, 2], 2, 0).unwrap(), "{\n\t0x00, 0x01,\n\t0x02\n}");
//! ```
use crate::error::DumpError;
use crate::util::{write_element, write_tabs};
use crate::Layout;
use std::fmt;
use std::io;
use std::io::Write as _;

struct LegacyArray<'a, T> {
    layout: Layout,
    values: &'a [T],
}

impl<T> fmt::Display for LegacyArray<'_, T>
where
    T: Copy + Into<u64>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let line_max = self.layout.line_max();
        let indent = self.layout.indent();
        let len = self.values.len();

        write_tabs(&mut *f, indent)?;
        f.write_str("{\n")?;

        let max = len.wrapping_sub(1);
        for (i, &value) in self.values.iter().enumerate() {
            let col = i % line_max;
            if col == 0 {
                write_tabs(&mut *f, indent + 1)?;
                write_element(&mut *f, value.into())?;
                f.write_str(",")?;
            } else if i == max {
                f.write_str(" ")?;
                write_element(&mut *f, value.into())?;
                f.write_str("\n")?;
            } else if col == line_max - 1 {
                f.write_str(" ")?;
                write_element(&mut *f, value.into())?;
                f.write_str(",\n")?;
            } else {
                f.write_str(" ")?;
                write_element(&mut *f, value.into())?;
                f.write_str(",")?;
            }
        }

        if line_max < len && len % line_max != 0 {
            f.write_str("\n")?;
        }

        write_tabs(&mut *f, indent)?;
        f.write_str("}")
    }
}

/// Render `values` the way the old script did.
pub fn to_string<T>(values: &[T], line_max: usize, indent: usize) -> Result<String, DumpError>
where
    T: Copy + Into<u64>,
{
    let layout = Layout::new(line_max, indent)?;
    Ok(LegacyArray { layout, values }.to_string())
}

/// Write `values` to `out` the way the old script did.
pub fn dump<T>(
    mut out: impl io::Write,
    values: &[T],
    line_max: usize,
    indent: usize,
) -> Result<(), DumpError>
where
    T: Copy + Into<u64>,
{
    let layout = Layout::new(line_max, indent)?;
    tracing::trace!(len = values.len(), line_max, indent, "writing legacy hex array");

    write!(out, "{}", LegacyArray { layout, values }).map_err(DumpError::write)
}
