use crate::Layout;
use crate::DEFAULT_LINE_MAX;
use serde::de;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize};

impl Serialize for Layout {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut struct_ = serializer.serialize_struct("Layout", 2)?;
        struct_.serialize_field("line_max", &self.line_max)?;
        struct_.serialize_field("indent", &self.indent)?;
        struct_.end()
    }
}

/// Unchecked mirror of `Layout`; goes through `Layout::new` before it's handed out.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawLayout {
    #[serde(default = "default_line_max")]
    line_max: usize,
    #[serde(default)]
    indent: usize,
}

fn default_line_max() -> usize {
    DEFAULT_LINE_MAX
}

impl<'de> Deserialize<'de> for Layout {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawLayout::deserialize(deserializer)?;
        Layout::new(raw.line_max, raw.indent).map_err(de::Error::custom)
    }
}
