//! Hexarray formats a sequence of byte-sized integers as a bracketed, comma-separated hex
//! literal block, ready to be pasted into C (or Rust, or anything with brace initializers).
//!
//! # Example
//! ```
//! use hexarray::Layout;
//!
//! let layout = Layout::new(2, 1).unwrap();
//! let block = layout.render(&[0xde_u8, 0xad, 0xbe, 0xef, 0x01]);
//!
//! assert_eq!(block, "\t{\n\t\t0xde, 0xad,\n\t\t0xbe, 0xef,\n\t\t0x01\n\t}");
//! ```
mod error;
pub mod legacy;
/// Serialize/Deserialize impls are in here
mod serde;
mod util;

pub use error::{DumpError, LayoutError};
use std::fmt;
use std::io;
use std::io::Write as _;
use util::{write_element, write_tabs};

/// Values per line used by `Layout::default()`.
pub const DEFAULT_LINE_MAX: usize = 12;

/// How a hex array is wrapped and indented.
///
/// `line_max` is the number of values placed on one content line, and `indent` is the number
/// of tabs in front of the braces. Content lines get one extra tab.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Layout {
    line_max: usize,
    indent: usize,
}

impl Layout {
    /// Create a layout, rejecting a `line_max` of zero.
    ///
    /// ```
    /// use hexarray::{Layout, LayoutError};
    ///
    /// assert!(Layout::new(8, 0).is_ok());
    /// assert_eq!(Layout::new(0, 0), Err(LayoutError::InvalidLineMax { line_max: 0 }));
    /// ```
    pub fn new(line_max: usize, indent: usize) -> Result<Self, LayoutError> {
        if line_max == 0 {
            return Err(LayoutError::InvalidLineMax { line_max });
        }

        Ok(Layout { line_max, indent })
    }

    pub fn line_max(&self) -> usize {
        self.line_max
    }

    pub fn indent(&self) -> usize {
        self.indent
    }

    /// Returns a copy of this layout with a different indentation depth.
    pub fn with_indent(self, indent: usize) -> Self {
        Layout { indent, ..self }
    }

    /// Wrap `values` so they can be used with `format!`, `write!` and friends.
    ///
    /// ```
    /// use hexarray::Layout;
    ///
    /// let layout = Layout::new(4, 0).unwrap();
    /// let source = format!("static const uint8_t data[] = {};", layout.display(&[1u8, 2, 3]));
    /// assert_eq!(source, "static const uint8_t data[] = {\n\t0x01, 0x02, 0x03\n};");
    /// ```
    pub fn display<'a, T>(&self, values: &'a [T]) -> HexArray<'a, T>
    where
        T: Copy + Into<u64>,
    {
        HexArray {
            layout: *self,
            values,
        }
    }

    /// Render `values` into a new `String`.
    pub fn render<T>(&self, values: &[T]) -> String
    where
        T: Copy + Into<u64>,
    {
        self.display(values).to_string()
    }

    /// Write `values` to an output stream, e.g. `std::io::stdout()` or a `File`.
    ///
    /// Nothing is written after the closing brace, not even a newline.
    pub fn write_to<T>(&self, mut out: impl io::Write, values: &[T]) -> Result<(), DumpError>
    where
        T: Copy + Into<u64>,
    {
        tracing::trace!(
            len = values.len(),
            line_max = self.line_max,
            indent = self.indent,
            "writing hex array"
        );

        write!(out, "{}", self.display(values)).map_err(DumpError::write)
    }
}

impl Default for Layout {
    fn default() -> Self {
        Layout {
            line_max: DEFAULT_LINE_MAX,
            indent: 0,
        }
    }
}

/// A slice of values paired with a [`Layout`]. The `Display` impl produces the hex array.
///
/// Created with [`Layout::display`].
///
/// [`Layout`]: ./struct.Layout.html
/// [`Layout::display`]: ./struct.Layout.html#method.display
#[derive(Debug, Clone, Copy)]
pub struct HexArray<'a, T> {
    layout: Layout,
    values: &'a [T],
}

impl<T> fmt::Display for HexArray<'_, T>
where
    T: Copy + Into<u64>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Layout { line_max, indent } = self.layout;

        write_tabs(&mut *f, indent)?;
        f.write_str("{\n")?;

        let rows = self.values.chunks(line_max);
        let row_count = rows.len();
        for (row_index, row) in rows.enumerate() {
            write_tabs(&mut *f, indent + 1)?;

            for (col, &value) in row.iter().enumerate() {
                if col > 0 {
                    f.write_str(" ")?;
                }
                write_element(&mut *f, value.into())?;

                let last_overall = row_index + 1 == row_count && col + 1 == row.len();
                if !last_overall {
                    f.write_str(",")?;
                }
            }

            f.write_str("\n")?;
        }

        write_tabs(&mut *f, indent)?;
        f.write_str("}")
    }
}

/// Render `values` with `line_max` values per line and `indent` tabs before the braces.
///
/// # Example
/// ```
/// let block = hexarray::dump(&[0u8, 1, 2], 2, 0).unwrap();
/// assert_eq!(block, "{\n\t0x00, 0x01,\n\t0x02\n}");
///
/// assert!(hexarray::dump(&[0u8], 0, 0).is_err());
/// ```
pub fn dump<T>(values: &[T], line_max: usize, indent: usize) -> Result<String, DumpError>
where
    T: Copy + Into<u64>,
{
    let layout = Layout::new(line_max, indent)?;
    tracing::trace!(len = values.len(), line_max, indent, "rendering hex array");
    Ok(layout.render(values))
}
