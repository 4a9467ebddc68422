//! File-upload side flow: an asynchronous request/response pair keyed by a
//! single in-flight token.
//!
//! The platform reports "page wants a file" and, later and separately, "the
//! user picked these files". The token correlates the two; a stale pending
//! request is discarded (its responder receives an empty result) whenever a
//! new one arrives.

use std::fmt;

use tracing::{debug, warn};
use webpane_common::id;

/// Correlates one upload request with its eventual fulfillment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadToken(String);

impl fmt::Display for UploadToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Receives the chosen file URIs, exactly once. Empty means canceled.
pub type UploadResponder = Box<dyn FnOnce(Vec<String>) + Send>;

/// At most one upload request is in flight per session.
#[derive(Default)]
pub struct FileChooser {
    pending: Option<(UploadToken, UploadResponder)>,
}

impl FileChooser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new upload request. Any previous unfulfilled request is
    /// discarded with an empty result.
    pub fn begin(&mut self, responder: UploadResponder) -> UploadToken {
        if let Some((stale, respond)) = self.pending.take() {
            warn!(token = %stale, "discarding stale upload request");
            respond(Vec::new());
        }
        let token = UploadToken(id::new_request_token());
        self.pending = Some((token.clone(), responder));
        token
    }

    /// Deliver results for the request identified by `token`. Returns `false`
    /// when the token does not match the pending request (stale fulfillment,
    /// ignored).
    pub fn fulfill(&mut self, token: &UploadToken, results: Vec<String>) -> bool {
        let matches = self
            .pending
            .as_ref()
            .map(|(pending, _)| pending == token)
            .unwrap_or(false);
        if !matches {
            debug!(token = %token, "ignoring fulfillment for unknown upload request");
            return false;
        }
        if let Some((_, respond)) = self.pending.take() {
            respond(results);
        }
        true
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn recorder() -> (Arc<Mutex<Vec<Vec<String>>>>, UploadResponder) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let clone = Arc::clone(&seen);
        let responder: UploadResponder = Box::new(move |results| {
            clone.lock().unwrap().push(results);
        });
        (seen, responder)
    }

    #[test]
    fn fulfill_delivers_once_and_clears() {
        let mut chooser = FileChooser::new();
        let (seen, responder) = recorder();
        let token = chooser.begin(responder);
        assert!(chooser.has_pending());

        assert!(chooser.fulfill(&token, vec!["file:///a.jpg".into()]));
        assert!(!chooser.has_pending());
        assert_eq!(seen.lock().unwrap().as_slice(), &[vec![
            "file:///a.jpg".to_string()
        ]]);

        // Second fulfillment for the same token is stale.
        assert!(!chooser.fulfill(&token, vec!["file:///b.jpg".into()]));
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn cancel_delivers_empty() {
        let mut chooser = FileChooser::new();
        let (seen, responder) = recorder();
        let token = chooser.begin(responder);

        assert!(chooser.fulfill(&token, Vec::new()));
        assert_eq!(seen.lock().unwrap().as_slice(), &[Vec::<String>::new()]);
    }

    #[test]
    fn new_request_discards_stale_pending() {
        let mut chooser = FileChooser::new();
        let (old_seen, old_responder) = recorder();
        let old_token = chooser.begin(old_responder);

        let (new_seen, new_responder) = recorder();
        let new_token = chooser.begin(new_responder);

        // The stale responder got an empty result immediately.
        assert_eq!(old_seen.lock().unwrap().as_slice(), &[Vec::<String>::new()]);

        // The old token no longer fulfills anything.
        assert!(!chooser.fulfill(&old_token, vec!["file:///late.jpg".into()]));
        assert!(new_seen.lock().unwrap().is_empty());

        assert!(chooser.fulfill(&new_token, vec!["file:///ok.jpg".into()]));
        assert_eq!(new_seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn fulfill_without_pending_is_ignored() {
        let mut chooser = FileChooser::new();
        let (_, responder) = recorder();
        let token = chooser.begin(responder);
        let _ = chooser.fulfill(&token, Vec::new());

        assert!(!chooser.fulfill(&token, Vec::new()));
    }
}
