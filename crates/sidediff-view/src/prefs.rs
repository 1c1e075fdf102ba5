//! User preferences shared by every render.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use sidediff_core::InlineMode;

/// Text shown in both inputs on first run.
pub const PLACEHOLDER_TEXT: &str = "Paste a text";

/// How changed rows are shown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffMode {
    /// Whole lines only, no inline highlighting.
    #[default]
    Lines,
    Words,
    Chars,
}

impl DiffMode {
    /// The inline diff granularity, if this mode highlights within lines.
    pub fn inline(self) -> Option<InlineMode> {
        match self {
            DiffMode::Lines => None,
            DiffMode::Words => Some(InlineMode::Words),
            DiffMode::Chars => Some(InlineMode::Chars),
        }
    }
}

/// Persisted view state: both texts and the display options.
///
/// Fields are read one by one: a missing, `null`, or mistyped field falls
/// back to its default without affecting the others. Flags accept any JSON
/// value and are read by truthiness.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Original (left) text.
    #[serde(deserialize_with = "or_default")]
    pub left: String,
    /// Modified (right) text.
    #[serde(deserialize_with = "or_default")]
    pub right: String,
    #[serde(deserialize_with = "or_default")]
    pub mode: DiffMode,
    #[serde(rename = "ignoreWs", deserialize_with = "truthy")]
    pub ignore_whitespace: bool,
    #[serde(deserialize_with = "truthy")]
    pub wrap: bool,
}

fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

fn truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => false,
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    })
}

impl Preferences {
    /// Preferences used when nothing has been saved yet.
    pub fn first_run() -> Self {
        Self {
            left: PLACEHOLDER_TEXT.to_string(),
            right: PLACEHOLDER_TEXT.to_string(),
            ..Self::default()
        }
    }

    pub fn swap(&mut self) {
        std::mem::swap(&mut self.left, &mut self.right);
    }
}
