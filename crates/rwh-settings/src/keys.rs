//! Logical preference keys.
//!
//! Keys are held un-prefixed; [`Settings`](crate::Settings) prepends
//! [`OPTIONS_PREFIX`](crate::OPTIONS_PREFIX) exactly once per storage round
//! trip. The per-identity enabled flag is the only dynamically built key,
//! see [`identity_enabled_key`](crate::identity_enabled_key).

/// Selected header label sequence style id, see
/// [`header_label_seq`](crate::header_label_seq).
pub const HEADER_LABEL_SEQ_STYLE: &str = "header.label.seq.style";

/// Date style of the quoted header: `0` locale format, `1` international
/// (UTC).
pub const HEADER_DATE_FORMAT: &str = "header.date.format";

/// Time style of the quoted header: `0` 12-hour AM/PM, `1` 24-hour.
pub const HEADER_TIME_FORMAT: &str = "header.time.format";

/// Whether the quoted date header includes timezone info.
pub const HEADER_TIME_ZONE: &str = "header.date.timezone";

/// Locale used to render header labels.
pub const HEADER_LOCALE: &str = "header.locale";

/// Whether the header locale was explicitly chosen by the user.
pub const HEADER_LOCALE_USER_SELECTED: &str = "header.locale.user.selected";

/// Whether plain-text replies get the prefix text above the header block.
pub const HEADER_PLAIN_PREFIX_TEXT: &str = "header.plain.prefix.text";

/// Whether HTML replies get a horizontal rule above the header block.
pub const HEADER_HTML_PREFIX_LINE: &str = "header.html.prefix.line";

/// Color of the HTML prefix rule.
pub const HEADER_HTML_PREFIX_LINE_COLOR: &str = "header.html.prefix.line.color";

/// Whether the HTML header block uses an explicit font size.
pub const HEADER_HTML_FONT_SIZE: &str = "header.html.font.size";

/// Font size applied when [`HEADER_HTML_FONT_SIZE`] is on.
pub const HEADER_HTML_FONT_SIZE_VALUE: &str = "header.html.font.size.value";

/// Whether the subject prefix is translated to the header locale.
pub const TRANS_SUBJECT_PREFIX: &str = "trans.subject.prefix";

/// Whether the blockquote border color is stripped from the first quote
/// level.
pub const CLEAN_BLOCKQUOTE_COLOR: &str = "clean.blockquote.color";

/// Whether blockquote border colors are stripped from all quote levels.
pub const CLEAN_ALL_BLOCKQUOTE_COLOR: &str = "clean.blockquote.all.color";

/// Whether `>` quote characters are stripped from plain-text replies.
pub const CLEAN_QUOTE_CHAR_GREATER_THAN: &str = "clean.quote.char.greaterthan";
