//! Seams toward the platform: the embedded web widget and external URL
//! resolution.
//!
//! The session wraps the widget by composition rather than subclassing it;
//! everything it needs from the platform is on these two traits, which is
//! also what makes the lifecycle and bridge logic testable without a
//! rendering engine.

use std::sync::Arc;

use webpane_common::WidgetError;

use crate::config::MixedContentMode;

/// Host-exposed callable surface registered into the page's script
/// environment. Page script may invoke it at arbitrary times, including
/// overlapping an in-flight navigation; each call is one independent event.
pub type BridgeHandler = Arc<dyn Fn(String) + Send + Sync>;

/// The embedded web-rendering widget. Implementations wrap whatever native
/// web view the target platform supplies; calls are fire-and-forget from the
/// UI-owning thread.
pub trait PlatformWebView {
    // Navigation primitives — pure delegation.
    fn go_back(&mut self);
    fn go_forward(&mut self);
    fn reload(&mut self);
    fn stop_loading(&mut self);

    // Content loading.
    fn load_url(&mut self, url: &str, headers: &[(String, String)]) -> Result<(), WidgetError>;
    fn post_url(&mut self, url: &str, body: &[u8]) -> Result<(), WidgetError>;
    fn load_html(&mut self, html: &str, base_url: Option<&str>) -> Result<(), WidgetError>;

    // Script execution in the page context.
    fn evaluate_script(&mut self, js: &str) -> Result<(), WidgetError>;
    /// Evaluate and hand the stringified result to `callback`. Used only for
    /// the debug-build native-postMessage probe.
    fn evaluate_script_with_result(&mut self, js: &str, callback: Box<dyn FnOnce(&str) + Send>);

    // Live page state, read at event-construction time.
    fn url(&self) -> Option<String>;
    fn title(&self) -> String;
    /// Load progress, 0..=100.
    fn progress(&self) -> u8;
    fn can_go_back(&self) -> bool;
    fn can_go_forward(&self) -> bool;
    fn javascript_enabled(&self) -> bool;

    // Bridge surface registration. Page code that captured a reference to a
    // removed surface may still call it — a platform limitation the session
    // does not correct.
    fn register_bridge(&mut self, name: &str, handler: BridgeHandler);
    fn remove_bridge(&mut self, name: &str);

    // Settings, each driven by one `ViewConfig` field.
    fn set_javascript_enabled(&mut self, enabled: bool);
    fn set_dom_storage_enabled(&mut self, enabled: bool);
    fn set_user_agent(&mut self, user_agent: &str);
    fn set_mixed_content_mode(&mut self, mode: MixedContentMode);
    fn set_wide_viewport(&mut self, enabled: bool);
    fn set_media_playback_requires_gesture(&mut self, requires: bool);
    fn set_allow_universal_access_from_file_urls(&mut self, allow: bool);
    fn set_save_form_data(&mut self, save: bool);
    fn set_upload_capture_enabled(&mut self, enabled: bool);
    fn set_accept_third_party_cookies(&mut self, accept: bool);

    /// Final release of the platform widget. After this the widget stops
    /// delivering callbacks; no cancellation exists for script already
    /// executing in the page.
    fn release(&mut self);
}

/// Best-effort external URL handling for schemes the widget does not load
/// itself (`mailto:`, `tel:`, custom app schemes). Failure means no handler
/// exists; the caller logs and swallows it.
pub trait IntentResolver {
    fn open_external(&self, url: &str) -> Result<(), WidgetError>;
}
