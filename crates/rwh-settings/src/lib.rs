#![doc = include_str!("../README.md")]

mod defaults;
mod identity;
/// Logical preference keys, un-prefixed.
pub mod keys;
mod settings;
mod styles;

pub use defaults::default_for;
pub use identity::{Identity, identity_enabled_key};
pub use settings::{Settings, SettingsError};
pub use styles::header_label_seq;

/// Namespace prefix prepended to every persisted preference key.
pub const OPTIONS_PREFIX: &str = "extensions.replywithheader.";

/// Subject prefix applied to replies.
pub const REPLY_SUBJECT_PREFIX: &str = "Re:";

/// Subject prefix applied to forwards.
pub const FORWARD_SUBJECT_PREFIX: &str = "Fwd:";

/// Addon homepage.
pub const HOMEPAGE_URL: &str = "http://myjeeva.com/replywithheader-mozilla";

/// Reviews page on the Thunderbird addons site.
pub const REVIEWS_PAGE_URL: &str =
    "https://addons.mozilla.org/en-US/thunderbird/addon/replywithheader/";

/// Issue tracker.
pub const ISSUES_PAGE_URL: &str =
    "https://github.com/jeevatkm/ReplyWithHeaderMozilla/issues";

/// PayPal donation link shown in the options UI.
pub const PAYPAL_DONATE_URL: &str = "https://www.paypal.com/donate/?cmd=_donations&business=QWMZG74FW4QYC&lc=US&item_name=ReplyWithHeader+(RWH)+Thunderbird+Addon&currency_code=USD";

/// GitHub sponsor link shown in the options UI.
pub const GITHUB_SPONSOR_URL: &str = "https://github.com/sponsors/jeevatkm?o=esb";
