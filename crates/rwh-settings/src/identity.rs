use serde::{Deserialize, Serialize};

/// A mail-account identity descriptor, as enumerated by the host client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Host-assigned identity id.
    pub id: String,
}

/// Builds the logical key for an identity's enabled flag:
/// `identity.<id>.enabled`.
///
/// Single point of key construction; callers never format this key
/// themselves.
pub fn identity_enabled_key(identity_id: &str) -> String {
    format!("identity.{identity_id}.enabled")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enabled_key_shape() {
        assert_eq!(identity_enabled_key("id3"), "identity.id3.enabled");
    }
}
