use std::sync::Arc;

use rwh_storage::{StorageArea, StorageError, StorageItems};
use serde_json::Value;
use thiserror::Error;

use crate::{
    OPTIONS_PREFIX, defaults,
    identity::{Identity, identity_enabled_key},
    keys,
};

/// Errors that can occur when working with settings.
///
/// There is no local recovery or retry; storage failures propagate to the
/// caller as-is.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The storage round trip failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Asynchronous accessor for the extension's named preferences.
///
/// Thin layer over the host [`StorageArea`]: it namespaces every key under
/// [`OPTIONS_PREFIX`], seeds first-run defaults without clobbering user
/// values, and exposes a typed getter per preference used by the
/// quoted-header formatting code. Every operation is a single storage round
/// trip; there are no retries and no timeouts, so a stalled backend stalls
/// the caller.
pub struct Settings {
    storage: Arc<dyn StorageArea>,
}

impl Settings {
    /// Creates an accessor over the given host storage area.
    pub fn new(storage: Arc<dyn StorageArea>) -> Self {
        Self { storage }
    }

    fn full_key(key: &str) -> String {
        format!("{OPTIONS_PREFIX}{key}")
    }

    /// Reads the namespaced `key` from storage.
    ///
    /// Returns `Ok(None)` when the store holds no entry for the key; the
    /// `fallback` is not applied on that path. It substitutes only for a
    /// stored literal string `"undefined"`. Both branches preserve the
    /// behavior the addon has always shipped with.
    pub async fn get(
        &self,
        key: &str,
        fallback: Option<Value>,
    ) -> Result<Option<Value>, SettingsError> {
        let full_key = Self::full_key(key);
        let mut items = self.storage.get(&full_key).await?;
        log::debug!("get {full_key} -> {items:?}");

        if items.is_empty() {
            return Ok(None);
        }

        match items.remove(&full_key) {
            Some(Value::String(s)) if s == "undefined" => Ok(fallback),
            Some(value) => Ok(Some(value)),
            None => Ok(None),
        }
    }

    /// Writes the namespaced `key`, overwriting any prior value.
    pub async fn set(&self, key: &str, value: Value) -> Result<(), SettingsError> {
        let full_key = Self::full_key(key);
        log::debug!("set {full_key} = {value:?}");
        self.storage
            .set(StorageItems::from([(full_key, value)]))
            .await?;
        Ok(())
    }

    /// Best-effort variant of [`set`](Self::set): spawns the storage round
    /// trip and returns immediately. Completion is not observed by the
    /// caller; failures are logged at warn level.
    ///
    /// Must be called from within a tokio runtime.
    pub fn set_detached(&self, key: &str, value: Value) {
        let full_key = Self::full_key(key);
        log::debug!("set (detached) {full_key} = {value:?}");
        let storage = Arc::clone(&self.storage);
        tokio::spawn(async move {
            if let Err(e) = storage.set(StorageItems::from([(full_key, value)])).await {
                log::warn!("Detached settings write failed: {e}");
            }
        });
    }

    /// Deletes the namespaced `key` from storage.
    pub async fn remove(&self, key: &str) -> Result<(), SettingsError> {
        self.storage.remove(&Self::full_key(key)).await?;
        Ok(())
    }

    /// Reads `key` with its default-table fallback and coerces the result
    /// to a base-10 integer.
    ///
    /// `Ok(None)` is the not-a-number sentinel: the key is absent or the
    /// stored value does not parse. Callers must guard against it.
    pub async fn get_int(&self, key: &str) -> Result<Option<i64>, SettingsError> {
        let value = self.get(key, defaults::default_for(key)).await?;
        Ok(value.as_ref().and_then(coerce_int))
    }

    /// Seeds `key` with `value` when no value is stored yet.
    ///
    /// Idempotent: an existing entry, whether user-set or previously
    /// seeded, is left untouched. Presence is judged on the raw storage
    /// result, so a stored literal `"undefined"` string counts as present
    /// here even though [`get`](Self::get) substitutes the fallback for it.
    /// The write is awaited so the seeded value is visible to subsequent
    /// reads.
    pub async fn set_default(&self, key: &str, value: Value) -> Result<(), SettingsError> {
        let full_key = Self::full_key(key);
        let items = self.storage.get(&full_key).await?;
        log::debug!("get {full_key} -> {items:?}");

        if items.is_empty() {
            self.set(key, value).await?;
        }
        Ok(())
    }

    /// Seeds every entry of the default table, one write at a time.
    ///
    /// Called once at extension startup to establish first-run preferences;
    /// never overwrites an existing user value.
    pub async fn set_defaults(&self) -> Result<(), SettingsError> {
        for (key, value) in defaults::DEFAULT_SETTINGS {
            self.set_default(key, Value::from(*value)).await?;
        }
        Ok(())
    }

    /// Seeds the enabled flag to `true` for each identity, one write at a
    /// time. An identity the user has disabled stays disabled.
    pub async fn set_identity_defaults(
        &self,
        identities: &[Identity],
    ) -> Result<(), SettingsError> {
        for identity in identities {
            self.set_default(&identity_enabled_key(&identity.id), Value::Bool(true))
                .await?;
        }
        Ok(())
    }

    /// Whether header insertion is enabled for the given identity.
    ///
    /// A flag that was never seeded reads as disabled, since an empty
    /// storage result bypasses the fallback (see [`get`](Self::get)).
    pub async fn is_identity_enabled(&self, identity_id: &str) -> Result<bool, SettingsError> {
        self.get_flag(&identity_enabled_key(identity_id), Some(Value::Bool(true)))
            .await
    }

    /// Selected header label sequence style id, resolvable via
    /// [`header_label_seq`](crate::header_label_seq).
    pub async fn get_header_label_seq_style(&self) -> Result<Option<i64>, SettingsError> {
        self.get_int(keys::HEADER_LABEL_SEQ_STYLE).await
    }

    /// Date style of the quoted header: `0` locale format, `1`
    /// international (UTC).
    pub async fn get_header_date_format(&self) -> Result<Option<i64>, SettingsError> {
        self.get_int(keys::HEADER_DATE_FORMAT).await
    }

    /// Time style of the quoted header: `0` 12-hour AM/PM, `1` 24-hour.
    pub async fn get_header_time_format(&self) -> Result<Option<i64>, SettingsError> {
        self.get_int(keys::HEADER_TIME_FORMAT).await
    }

    /// Whether the quoted date header includes timezone info.
    pub async fn is_header_time_zone(&self) -> Result<bool, SettingsError> {
        self.default_flag(keys::HEADER_TIME_ZONE).await
    }

    /// Locale used to render header labels.
    pub async fn get_header_locale(&self) -> Result<Option<String>, SettingsError> {
        self.get_string(keys::HEADER_LOCALE).await
    }

    /// Whether the header locale was explicitly chosen by the user.
    pub async fn is_header_locale_user_selected(&self) -> Result<bool, SettingsError> {
        self.default_flag(keys::HEADER_LOCALE_USER_SELECTED).await
    }

    /// Whether plain-text replies get the prefix text above the header
    /// block.
    pub async fn is_header_plain_prefix_text(&self) -> Result<bool, SettingsError> {
        self.default_flag(keys::HEADER_PLAIN_PREFIX_TEXT).await
    }

    /// Whether HTML replies get a horizontal rule above the header block.
    pub async fn is_header_html_prefix_line(&self) -> Result<bool, SettingsError> {
        self.default_flag(keys::HEADER_HTML_PREFIX_LINE).await
    }

    /// Color of the HTML prefix rule.
    pub async fn get_header_html_prefix_line_color(
        &self,
    ) -> Result<Option<String>, SettingsError> {
        self.get_string(keys::HEADER_HTML_PREFIX_LINE_COLOR).await
    }

    /// Whether the HTML header block uses an explicit font size.
    pub async fn is_header_html_font_size(&self) -> Result<bool, SettingsError> {
        self.default_flag(keys::HEADER_HTML_FONT_SIZE).await
    }

    /// Font size applied when [`is_header_html_font_size`](Self::is_header_html_font_size)
    /// is on.
    pub async fn get_header_html_font_size_value(
        &self,
    ) -> Result<Option<String>, SettingsError> {
        self.get_string(keys::HEADER_HTML_FONT_SIZE_VALUE).await
    }

    /// Whether the subject prefix is translated to the header locale.
    pub async fn is_trans_subject_prefix(&self) -> Result<bool, SettingsError> {
        self.default_flag(keys::TRANS_SUBJECT_PREFIX).await
    }

    /// Whether the blockquote border color is stripped from the first quote
    /// level.
    pub async fn is_clean_block_quote_color(&self) -> Result<bool, SettingsError> {
        self.default_flag(keys::CLEAN_BLOCKQUOTE_COLOR).await
    }

    /// Whether blockquote border colors are stripped from all quote levels.
    pub async fn is_clean_all_block_quote_color(&self) -> Result<bool, SettingsError> {
        self.default_flag(keys::CLEAN_ALL_BLOCKQUOTE_COLOR).await
    }

    /// Whether `>` quote characters are stripped from plain-text replies.
    pub async fn is_clean_quote_char_greater_than(&self) -> Result<bool, SettingsError> {
        self.default_flag(keys::CLEAN_QUOTE_CHAR_GREATER_THAN).await
    }

    /// Boolean read with an explicit fallback. Anything other than a stored
    /// boolean, the none sentinel included, reads as `false`.
    async fn get_flag(
        &self,
        key: &str,
        fallback: Option<Value>,
    ) -> Result<bool, SettingsError> {
        let value = self.get(key, fallback).await?;
        Ok(value.and_then(|v| v.as_bool()).unwrap_or(false))
    }

    /// Boolean read falling back to the default table.
    async fn default_flag(&self, key: &str) -> Result<bool, SettingsError> {
        self.get_flag(key, defaults::default_for(key)).await
    }

    /// String read falling back to the default table. Non-string stored
    /// values and the none sentinel read as `None`.
    async fn get_string(&self, key: &str) -> Result<Option<String>, SettingsError> {
        match self.get(key, defaults::default_for(key)).await? {
            Some(Value::String(s)) => Ok(Some(s)),
            _ => Ok(None),
        }
    }
}

fn coerce_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => parse_int_prefix(s),
        _ => None,
    }
}

/// Base-10 coercion with the original addon's shape: an optional sign and
/// the leading run of digits, trailing garbage ignored (`"42abc"` is 42).
/// No leading digit yields the not-a-number sentinel.
fn parse_int_prefix(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };

    let end = rest
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map_or(rest.len(), |(i, _)| i);
    let digits = rest.get(..end)?;
    if digits.is_empty() {
        return None;
    }

    let n: i64 = digits.parse().ok()?;
    Some(if negative { -n } else { n })
}

#[cfg(test)]
mod tests {
    use rwh_storage::MemoryStorageArea;
    use serde_json::json;

    use super::*;
    use crate::header_label_seq;

    fn settings() -> (Settings, MemoryStorageArea) {
        let area = MemoryStorageArea::new();
        (Settings::new(Arc::new(area.clone())), area)
    }

    #[tokio::test]
    async fn get_after_set_round_trips() {
        let (settings, _) = settings();
        settings
            .set(keys::HEADER_LOCALE, json!("de-DE"))
            .await
            .unwrap();

        let value = settings.get(keys::HEADER_LOCALE, None).await.unwrap();
        assert_eq!(value, Some(json!("de-DE")));
    }

    #[tokio::test]
    async fn get_before_any_set_returns_none_not_fallback() {
        let (settings, _) = settings();
        let value = settings
            .get(keys::HEADER_LOCALE, Some(json!("en-US")))
            .await
            .unwrap();
        assert_eq!(value, None);
    }

    #[tokio::test]
    async fn literal_undefined_string_substitutes_fallback() {
        let (settings, _) = settings();
        settings
            .set(keys::HEADER_LOCALE, json!("undefined"))
            .await
            .unwrap();

        let value = settings
            .get(keys::HEADER_LOCALE, Some(json!("en-US")))
            .await
            .unwrap();
        assert_eq!(value, Some(json!("en-US")));

        let no_fallback = settings.get(keys::HEADER_LOCALE, None).await.unwrap();
        assert_eq!(no_fallback, None);
    }

    #[tokio::test]
    async fn set_overwrites_prior_value() {
        let (settings, _) = settings();
        settings.set(keys::HEADER_LOCALE, json!("a")).await.unwrap();
        settings.set(keys::HEADER_LOCALE, json!("b")).await.unwrap();

        let value = settings.get(keys::HEADER_LOCALE, None).await.unwrap();
        assert_eq!(value, Some(json!("b")));
    }

    #[tokio::test]
    async fn remove_deletes_the_value() {
        let (settings, _) = settings();
        settings.set(keys::HEADER_LOCALE, json!("x")).await.unwrap();
        settings.remove(keys::HEADER_LOCALE).await.unwrap();

        let value = settings.get(keys::HEADER_LOCALE, None).await.unwrap();
        assert_eq!(value, None);
    }

    #[tokio::test]
    async fn keys_are_namespaced_exactly_once() {
        let (settings, area) = settings();
        settings.set(keys::HEADER_LOCALE, json!("x")).await.unwrap();

        let namespaced = area
            .get("extensions.replywithheader.header.locale")
            .await
            .unwrap();
        assert_eq!(namespaced.len(), 1);

        let bare = area.get("header.locale").await.unwrap();
        assert!(bare.is_empty());
    }

    #[tokio::test]
    async fn set_detached_write_lands() {
        let (settings, _) = settings();
        settings.set_detached(keys::HEADER_LOCALE, json!("fr-FR"));

        for _ in 0..10 {
            tokio::task::yield_now().await;
        }

        let value = settings.get(keys::HEADER_LOCALE, None).await.unwrap();
        assert_eq!(value, Some(json!("fr-FR")));
    }

    #[tokio::test]
    async fn get_int_parses_stored_string() {
        let (settings, _) = settings();
        settings
            .set(keys::HEADER_DATE_FORMAT, json!("42"))
            .await
            .unwrap();
        assert_eq!(
            settings.get_int(keys::HEADER_DATE_FORMAT).await.unwrap(),
            Some(42)
        );
    }

    #[tokio::test]
    async fn get_int_accepts_stored_number() {
        let (settings, _) = settings();
        settings
            .set(keys::HEADER_DATE_FORMAT, json!(7))
            .await
            .unwrap();
        assert_eq!(
            settings.get_int(keys::HEADER_DATE_FORMAT).await.unwrap(),
            Some(7)
        );
    }

    #[tokio::test]
    async fn get_int_takes_the_leading_integer_prefix() {
        let (settings, _) = settings();
        settings
            .set(keys::HEADER_DATE_FORMAT, json!("42abc"))
            .await
            .unwrap();
        assert_eq!(
            settings.get_int(keys::HEADER_DATE_FORMAT).await.unwrap(),
            Some(42)
        );

        settings
            .set(keys::HEADER_DATE_FORMAT, json!(" -3px"))
            .await
            .unwrap();
        assert_eq!(
            settings.get_int(keys::HEADER_DATE_FORMAT).await.unwrap(),
            Some(-3)
        );
    }

    #[tokio::test]
    async fn get_int_yields_none_for_unparsable_value() {
        let (settings, _) = settings();
        settings
            .set(keys::HEADER_DATE_FORMAT, json!("abc"))
            .await
            .unwrap();
        assert_eq!(
            settings.get_int(keys::HEADER_DATE_FORMAT).await.unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn get_int_yields_none_when_absent() {
        let (settings, _) = settings();
        assert_eq!(
            settings.get_int(keys::HEADER_DATE_FORMAT).await.unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn set_default_is_idempotent() {
        let (settings, _) = settings();
        settings
            .set_default(keys::HEADER_LABEL_SEQ_STYLE, json!(3))
            .await
            .unwrap();
        settings
            .set_default(keys::HEADER_LABEL_SEQ_STYLE, json!(5))
            .await
            .unwrap();

        let value = settings
            .get(keys::HEADER_LABEL_SEQ_STYLE, None)
            .await
            .unwrap();
        assert_eq!(value, Some(json!(3)));
    }

    #[tokio::test]
    async fn set_default_leaves_a_stored_undefined_literal_untouched() {
        let (settings, area) = settings();
        settings
            .set(keys::HEADER_LOCALE, json!("undefined"))
            .await
            .unwrap();

        settings
            .set_default(keys::HEADER_LOCALE, json!("en-US"))
            .await
            .unwrap();

        let raw = area
            .get("extensions.replywithheader.header.locale")
            .await
            .unwrap();
        assert_eq!(
            raw.get("extensions.replywithheader.header.locale"),
            Some(&json!("undefined"))
        );
    }

    #[tokio::test]
    async fn set_defaults_never_overwrites_user_values() {
        let (settings, _) = settings();
        settings
            .set(keys::HEADER_LOCALE, json!("fr-FR"))
            .await
            .unwrap();

        settings.set_defaults().await.unwrap();

        assert_eq!(
            settings.get_header_locale().await.unwrap(),
            Some("fr-FR".to_string())
        );
        // Untouched keys still get seeded.
        assert!(settings.is_header_time_zone().await.unwrap());
        assert!(settings.is_header_plain_prefix_text().await.unwrap());
        assert!(!settings.is_header_html_font_size().await.unwrap());
    }

    #[tokio::test]
    async fn fresh_defaults_select_the_outlook_ordering() {
        let (settings, _) = settings();
        settings.set_defaults().await.unwrap();

        let style = settings.get_header_label_seq_style().await.unwrap();
        assert_eq!(style, Some(1));
        assert_eq!(
            header_label_seq(1),
            Some(&["from", "date", "to", "cc", "reply-to", "subject"][..])
        );
    }

    #[tokio::test]
    async fn seeded_defaults_are_visible_through_named_getters() {
        let (settings, _) = settings();
        settings.set_defaults().await.unwrap();

        assert_eq!(settings.get_header_date_format().await.unwrap(), Some(0));
        assert_eq!(settings.get_header_time_format().await.unwrap(), Some(0));
        assert_eq!(
            settings.get_header_locale().await.unwrap(),
            Some("en-US".to_string())
        );
        assert_eq!(
            settings.get_header_html_prefix_line_color().await.unwrap(),
            Some("#B5C4DF".to_string())
        );
        assert_eq!(
            settings.get_header_html_font_size_value().await.unwrap(),
            Some("11.5pt".to_string())
        );
        assert!(!settings.is_header_locale_user_selected().await.unwrap());
        assert!(settings.is_header_html_prefix_line().await.unwrap());
        assert!(settings.is_trans_subject_prefix().await.unwrap());
        assert!(settings.is_clean_block_quote_color().await.unwrap());
        assert!(!settings.is_clean_all_block_quote_color().await.unwrap());
        assert!(settings.is_clean_quote_char_greater_than().await.unwrap());
    }

    #[tokio::test]
    async fn boolean_getters_read_false_on_fresh_storage() {
        // Before set_defaults() runs, the empty storage result bypasses the
        // fallback, so flags read as disabled.
        let (settings, _) = settings();
        assert!(!settings.is_header_time_zone().await.unwrap());
        assert!(!settings.is_header_plain_prefix_text().await.unwrap());
    }

    #[tokio::test]
    async fn prefix_line_color_round_trips() {
        let (settings, _) = settings();
        settings
            .set(keys::HEADER_HTML_PREFIX_LINE_COLOR, json!("#FFFFFF"))
            .await
            .unwrap();

        assert_eq!(
            settings.get_header_html_prefix_line_color().await.unwrap(),
            Some("#FFFFFF".to_string())
        );
    }

    #[tokio::test]
    async fn identity_defaults_enable_each_identity() {
        let (settings, _) = settings();
        settings
            .set_identity_defaults(&[Identity {
                id: "acct1".to_string(),
            }])
            .await
            .unwrap();

        assert!(settings.is_identity_enabled("acct1").await.unwrap());
    }

    #[tokio::test]
    async fn unseeded_identity_reads_as_disabled() {
        let (settings, _) = settings();
        assert!(!settings.is_identity_enabled("unknown").await.unwrap());
    }

    #[tokio::test]
    async fn identity_seeding_keeps_a_user_disabled_identity_disabled() {
        let (settings, _) = settings();
        settings
            .set(&identity_enabled_key("acct1"), json!(false))
            .await
            .unwrap();

        settings
            .set_identity_defaults(&[Identity {
                id: "acct1".to_string(),
            }])
            .await
            .unwrap();

        assert!(!settings.is_identity_enabled("acct1").await.unwrap());
    }
}
