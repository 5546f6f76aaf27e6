//! Header label sequence style presets.

/// Preset header-field orderings for the quoted-header block, indexed by the
/// persisted style id. Styles 0-3 include the subject line, styles 4-7 are
/// the same orderings without it.
const HEADER_LABEL_SEQ_STYLES: [&[&str]; 8] = [
    &["subject", "date", "from", "to", "cc", "reply-to"], // Thunderbird
    &["from", "date", "to", "cc", "reply-to", "subject"], // Outlook
    &["from", "date", "subject"],                         // Simple
    &["from", "to", "cc", "date", "reply-to", "subject"], // Lookout
    &["date", "from", "to", "cc", "reply-to"],            // Thunderbird
    &["from", "date", "to", "cc", "reply-to"],            // Outlook
    &["from", "date"],                                    // Simple
    &["from", "to", "cc", "date", "reply-to"],            // Lookout
];

/// Resolves a persisted style id to its header-field ordering.
///
/// Returns `None` for ids outside the preset range.
pub fn header_label_seq(style: i64) -> Option<&'static [&'static str]> {
    usize::try_from(style)
        .ok()
        .and_then(|idx| HEADER_LABEL_SEQ_STYLES.get(idx).copied())
}
