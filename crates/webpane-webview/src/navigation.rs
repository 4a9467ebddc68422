//! Navigation lifecycle state machine and URL-scheme routing policy.

// =============================================================================
// SCHEME POLICY
// =============================================================================

/// Schemes that load inside the widget. Everything else leaves it.
pub const IN_WIDGET_SCHEMES: &[&str] = &["http://", "https://", "file://"];

/// Prefix whose URLs are dropped outright: in-widget navigation is canceled
/// and no external dispatch is attempted.
pub const SUPPRESSED_PREFIX: &str = "market://";

/// What to do with a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavDecision {
    /// Let the widget load the URL itself.
    Proceed,
    /// Cancel in-widget navigation and hand the URL to the platform's
    /// external resolver, best effort.
    OpenExternal,
    /// Cancel in-widget navigation and do nothing else.
    Suppress,
}

pub fn decide(url: &str) -> NavDecision {
    if IN_WIDGET_SCHEMES.iter().any(|s| url.starts_with(s)) {
        NavDecision::Proceed
    } else if url.starts_with(SUPPRESSED_PREFIX) {
        NavDecision::Suppress
    } else {
        NavDecision::OpenExternal
    }
}

// =============================================================================
// LIFECYCLE STATE MACHINE
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Finished,
    Failed,
}

/// Per-session load-lifecycle tracker.
///
/// The widget reports an error without a matching finish signal; downstream
/// consumers expect finish-then-error. `last_load_failed` is what lets the
/// session synthesize the finish and then swallow the widget's own finish
/// callback for that attempt.
#[derive(Debug, Default)]
pub struct NavigationObserver {
    state: LoadState,
    last_load_failed: bool,
}

impl NavigationObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// A new load attempt started; clears the failure flag from any previous
    /// attempt.
    pub fn page_started(&mut self) {
        self.last_load_failed = false;
        self.state = LoadState::Loading;
    }

    /// The widget reported a finish. Returns `true` when the finish is
    /// genuine — i.e. this attempt has not already failed and emitted its
    /// synthesized finish.
    pub fn page_finished(&mut self) -> bool {
        if self.last_load_failed {
            return false;
        }
        self.state = LoadState::Finished;
        true
    }

    /// The widget reported a load error for the current attempt.
    pub fn page_failed(&mut self) {
        self.last_load_failed = true;
        self.state = LoadState::Failed;
    }

    pub fn last_load_failed(&self) -> bool {
        self.last_load_failed
    }

    pub fn state(&self) -> LoadState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- Scheme policy ---

    #[test]
    fn http_https_file_proceed_in_widget() {
        assert_eq!(decide("http://example.com"), NavDecision::Proceed);
        assert_eq!(decide("https://example.com/path?q=1"), NavDecision::Proceed);
        assert_eq!(decide("file:///sdcard/page.html"), NavDecision::Proceed);
    }

    #[test]
    fn market_urls_are_suppressed() {
        assert_eq!(decide("market://details?id=x"), NavDecision::Suppress);
    }

    #[test]
    fn other_schemes_go_external() {
        assert_eq!(decide("tel:12345"), NavDecision::OpenExternal);
        assert_eq!(decide("mailto:a@b.c"), NavDecision::OpenExternal);
        assert_eq!(decide("intent://scan/#Intent;end"), NavDecision::OpenExternal);
        assert_eq!(decide("myapp://open"), NavDecision::OpenExternal);
    }

    #[test]
    fn scheme_match_is_prefix_based_and_case_sensitive() {
        // The widget hands URLs through as-is; only exact lowercase prefixes
        // count as in-widget.
        assert_eq!(decide("HTTPS://example.com"), NavDecision::OpenExternal);
        assert_eq!(decide("httpsx://example.com"), NavDecision::OpenExternal);
    }

    // --- Lifecycle ---

    #[test]
    fn successful_load() {
        let mut nav = NavigationObserver::new();
        assert_eq!(nav.state(), LoadState::Idle);

        nav.page_started();
        assert_eq!(nav.state(), LoadState::Loading);
        assert!(!nav.last_load_failed());

        assert!(nav.page_finished());
        assert_eq!(nav.state(), LoadState::Finished);
    }

    #[test]
    fn failed_load_swallows_widget_finish() {
        let mut nav = NavigationObserver::new();
        nav.page_started();
        nav.page_failed();
        assert!(nav.last_load_failed());
        assert_eq!(nav.state(), LoadState::Failed);

        // A late finish callback for the failed attempt is not genuine.
        assert!(!nav.page_finished());
        assert_eq!(nav.state(), LoadState::Failed);
    }

    #[test]
    fn restart_clears_failure() {
        let mut nav = NavigationObserver::new();
        nav.page_started();
        nav.page_failed();

        nav.page_started();
        assert!(!nav.last_load_failed());
        assert!(nav.page_finished());
    }
}
