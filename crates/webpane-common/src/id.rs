use serde::{Deserialize, Serialize};
use std::fmt;

/// Short hex token used to correlate an asynchronous request with its
/// response (e.g. a file-upload round trip). Eight hex characters is plenty
/// for the at-most-one-in-flight uses it has; collisions only matter within
/// a single session's pending slot.
pub fn new_request_token() -> String {
    let mut token = uuid::Uuid::new_v4().simple().to_string();
    token.truncate(8);
    token
}

/// Identifies one embedded-browser session. Carried as the `target` field on
/// every outbound event so the owning component can route it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_token_shape() {
        let token = new_request_token();
        assert_eq!(token.len(), 8);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn request_token_is_unique() {
        let a = new_request_token();
        let b = new_request_token();
        assert_ne!(a, b);
    }

    #[test]
    fn session_id_is_a_v4_uuid() {
        let sid = SessionId::new();
        let parsed = uuid::Uuid::parse_str(sid.as_str()).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
    }

    #[test]
    fn session_id_display_matches_inner() {
        let sid = SessionId::new();
        assert_eq!(sid.to_string(), sid.as_str());
    }

    #[test]
    fn session_id_equality() {
        let sid = SessionId::new();
        let cloned = sid.clone();
        assert_eq!(sid, cloned);

        let other = SessionId::new();
        assert_ne!(sid, other);
    }

    #[test]
    fn session_id_serialization() {
        let sid = SessionId::new();
        let json = serde_json::to_string(&sid).unwrap();
        let deserialized: SessionId = serde_json::from_str(&json).unwrap();
        assert_eq!(sid, deserialized);
    }

    #[test]
    fn session_id_usable_as_map_key() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        let s1 = SessionId::new();
        let s2 = s1.clone();
        set.insert(s1);
        set.insert(s2);
        assert_eq!(set.len(), 1);
    }
}
