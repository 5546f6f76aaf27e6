use serde_json::Value;

use crate::keys;

/// A preference default as held in the compile-time default table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DefaultValue {
    /// Boolean preference.
    Bool(bool),
    /// Integer preference.
    Int(i64),
    /// String preference.
    Str(&'static str),
}

impl From<DefaultValue> for Value {
    fn from(value: DefaultValue) -> Self {
        match value {
            DefaultValue::Bool(b) => Value::Bool(b),
            DefaultValue::Int(i) => Value::from(i),
            DefaultValue::Str(s) => Value::from(s),
        }
    }
}

/// First-run defaults, seeded once at extension startup by
/// [`Settings::set_defaults`](crate::Settings::set_defaults). Never mutated
/// at runtime.
pub(crate) const DEFAULT_SETTINGS: &[(&str, DefaultValue)] = &[
    (keys::HEADER_LABEL_SEQ_STYLE, DefaultValue::Int(1)),
    (keys::HEADER_LOCALE, DefaultValue::Str("en-US")),
    (keys::HEADER_LOCALE_USER_SELECTED, DefaultValue::Bool(false)),
    (keys::HEADER_PLAIN_PREFIX_TEXT, DefaultValue::Bool(true)),
    (keys::HEADER_HTML_PREFIX_LINE, DefaultValue::Bool(true)),
    (
        keys::HEADER_HTML_PREFIX_LINE_COLOR,
        DefaultValue::Str("#B5C4DF"),
    ),
    (keys::HEADER_HTML_FONT_SIZE, DefaultValue::Bool(false)),
    (keys::HEADER_HTML_FONT_SIZE_VALUE, DefaultValue::Str("11.5pt")),
    (keys::TRANS_SUBJECT_PREFIX, DefaultValue::Bool(true)),
    (keys::HEADER_DATE_FORMAT, DefaultValue::Int(0)),
    (keys::HEADER_TIME_FORMAT, DefaultValue::Int(0)),
    (keys::HEADER_TIME_ZONE, DefaultValue::Bool(true)),
    (keys::CLEAN_BLOCKQUOTE_COLOR, DefaultValue::Bool(true)),
    (keys::CLEAN_ALL_BLOCKQUOTE_COLOR, DefaultValue::Bool(false)),
    (keys::CLEAN_QUOTE_CHAR_GREATER_THAN, DefaultValue::Bool(true)),
];

/// Looks up the first-run default for a logical key.
pub fn default_for(key: &str) -> Option<Value> {
    DEFAULT_SETTINGS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, value)| Value::from(*value))
}
