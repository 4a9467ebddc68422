//! One embedded-browser session: the widget, its bridge and navigation
//! state, and the command surface the host framework drives.

use std::sync::Arc;

use tracing::{debug, warn};
use webpane_common::{CommandError, SessionId, WidgetError};

use crate::bridge;
use crate::chooser::{FileChooser, UploadResponder, UploadToken};
use crate::config::{PageSource, ViewConfig};
use crate::events::{EventSink, PageInfo, WebViewEvent};
use crate::navigation::{self, NavDecision, NavigationObserver};
use crate::widget::{IntentResolver, PlatformWebView};

// Loading `about:blank` reliably resets the page state and releases its
// resources, including any running JavaScript.
const BLANK_URL: &str = "about:blank";

/// Imperative commands the host framework issues against a live session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    GoBack,
    GoForward,
    Reload,
    StopLoading,
    PostMessage(String),
    InjectJavaScript(String),
}

impl Command {
    /// Resolve a framework-level command name. Unknown names yield `None`
    /// and are ignored by the dispatcher.
    pub fn from_name(name: &str, arg: Option<&str>) -> Option<Self> {
        match name {
            "goBack" => Some(Self::GoBack),
            "goForward" => Some(Self::GoForward),
            "reload" => Some(Self::Reload),
            "stopLoading" => Some(Self::StopLoading),
            "postMessage" => Some(Self::PostMessage(arg.unwrap_or_default().to_string())),
            "injectJavaScript" => {
                Some(Self::InjectJavaScript(arg.unwrap_or_default().to_string()))
            }
            _ => None,
        }
    }
}

/// Wraps one platform widget instance by composition and owns all adapter
/// state for it. Created by the owning UI component and destroyed with it.
///
/// All methods run on the UI-owning thread. The widget's callbacks are wired
/// by platform glue to the `page_*`, `history_updated`, and
/// `navigation_requested` methods below.
pub struct BrowserSession<W: PlatformWebView> {
    id: SessionId,
    widget: W,
    intents: Box<dyn IntentResolver>,
    events: EventSink,
    observer: NavigationObserver,
    messaging_enabled: bool,
    /// Whether the shim is installed for the current page-load generation.
    /// Reset on every load start; the shim lives in page JavaScript and does
    /// not survive navigation.
    bridge_installed: bool,
    injected_javascript: Option<String>,
    chooser: FileChooser,
}

impl<W: PlatformWebView> BrowserSession<W> {
    pub fn new(mut widget: W, intents: Box<dyn IntentResolver>, events: EventSink) -> Self {
        widget.set_accept_third_party_cookies(true);
        let session = Self {
            id: SessionId::new(),
            widget,
            intents,
            events,
            observer: NavigationObserver::new(),
            messaging_enabled: false,
            bridge_installed: false,
            injected_javascript: None,
            chooser: FileChooser::new(),
        };
        debug!(session = %session.id, "session created");
        session
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn widget(&self) -> &W {
        &self.widget
    }

    pub fn widget_mut(&mut self) -> &mut W {
        &mut self.widget
    }

    /// Drain all pending events for this session's sink.
    pub fn drain_events(&self) -> Vec<WebViewEvent> {
        self.events.drain()
    }

    // =========================================================================
    // CONFIGURATION
    // =========================================================================

    /// Apply the full enumerated configuration in one pass.
    pub fn apply_configuration(&mut self, config: &ViewConfig) -> Result<(), WidgetError> {
        self.widget.set_javascript_enabled(config.javascript_enabled);
        self.widget.set_dom_storage_enabled(config.dom_storage_enabled);
        if let Some(user_agent) = &config.user_agent {
            self.widget.set_user_agent(user_agent);
        }
        self.widget.set_mixed_content_mode(config.mixed_content);
        self.widget.set_wide_viewport(!config.scales_page_to_fit);
        self.widget
            .set_media_playback_requires_gesture(config.media_playback_requires_gesture);
        self.widget
            .set_allow_universal_access_from_file_urls(config.allow_universal_access_from_file_urls);
        self.widget.set_save_form_data(!config.save_form_data_disabled);
        self.widget
            .set_upload_capture_enabled(config.upload_capture_enabled);
        self.injected_javascript = config.injected_javascript.clone();
        self.set_messaging_enabled(config.messaging_enabled);
        match &config.source {
            Some(source) => self.load_source(source),
            None => self.widget.load_url(BLANK_URL, &[]),
        }
    }

    fn load_source(&mut self, source: &PageSource) -> Result<(), WidgetError> {
        match source {
            PageSource::Html { html, base_url } => {
                self.widget.load_html(html, base_url.as_deref())
            }
            PageSource::Uri {
                uri,
                method,
                body,
                headers,
            } => {
                // The widget already shows this document; reloading it would
                // flash the page on every unrelated property update.
                if self.widget.url().as_deref() == Some(uri.as_str()) {
                    debug!(session = %self.id, url = %uri, "source unchanged, skipping reload");
                    return Ok(());
                }
                if method.as_deref() == Some("POST") {
                    let body = body.as_deref().unwrap_or_default();
                    return self.widget.post_url(uri, body.as_bytes());
                }
                let mut forwarded: Vec<(String, String)> = Vec::new();
                for (key, value) in headers {
                    if key.eq_ignore_ascii_case("user-agent") {
                        self.widget.set_user_agent(value);
                    } else {
                        forwarded.push((key.clone(), value.clone()));
                    }
                }
                self.widget.load_url(uri, &forwarded)
            }
        }
    }

    // =========================================================================
    // NAVIGATION OBSERVER
    // =========================================================================

    /// Widget callback: a page load started.
    pub fn page_started(&mut self, url: &str) {
        self.observer.page_started();
        self.bridge_installed = false;
        let page = self.page_info(url);
        self.events.push(WebViewEvent::LoadingStarted {
            target: self.id.clone(),
            page,
        });
    }

    /// Widget callback: a page load finished. Swallowed for attempts that
    /// already failed — their finish was synthesized in [`Self::page_failed`].
    pub fn page_finished(&mut self, url: &str) {
        if !self.observer.page_finished() {
            return;
        }
        self.run_injected_javascript();
        self.install_bridge();
        self.emit_finish(url);
    }

    /// Widget callback: the current load attempt failed. The widget reports
    /// the error without a matching finish signal, so the finish event is
    /// synthesized here to preserve the finish-then-error contract.
    pub fn page_failed(&mut self, url: &str, code: i32, description: &str) {
        self.observer.page_failed();
        self.emit_finish(url);
        let page = self.page_info(url);
        self.events.push(WebViewEvent::LoadingError {
            target: self.id.clone(),
            page,
            code,
            description: description.to_string(),
        });
    }

    /// Widget callback: the visited history changed.
    pub fn history_updated(&mut self, url: &str) {
        let page = self.page_info(url);
        self.events.push(WebViewEvent::HistoryUpdated {
            target: self.id.clone(),
            page,
        });
    }

    /// Widget callback: the page wants to navigate to `url`. Returns whether
    /// the widget should load it itself.
    pub fn navigation_requested(&mut self, url: &str) -> bool {
        match navigation::decide(url) {
            NavDecision::Proceed => true,
            NavDecision::Suppress => {
                debug!(session = %self.id, url = %url, "navigation suppressed");
                false
            }
            NavDecision::OpenExternal => {
                if let Err(err) = self.intents.open_external(url) {
                    warn!(session = %self.id, url = %url, error = %err,
                        "no activity found to handle uri scheme");
                }
                false
            }
        }
    }

    fn emit_finish(&mut self, url: &str) {
        let page = self.page_info(url);
        self.events.push(WebViewEvent::LoadingFinished {
            target: self.id.clone(),
            page,
        });
    }

    fn page_info(&self, url: &str) -> PageInfo {
        // The widget's own URL is not yet updated inside load callbacks, so
        // the callback argument is authoritative; everything else is read
        // live.
        PageInfo {
            url: url.to_string(),
            loading: !self.observer.last_load_failed() && self.widget.progress() < 100,
            title: self.widget.title(),
            can_go_back: self.widget.can_go_back(),
            can_go_forward: self.widget.can_go_forward(),
        }
    }

    fn run_injected_javascript(&mut self) {
        let Some(js) = self
            .injected_javascript
            .as_ref()
            .filter(|js| !js.is_empty())
        else {
            return;
        };
        if !self.widget.javascript_enabled() {
            return;
        }
        let script = bridge::wrapped_injection_script(js);
        if let Err(err) = self.widget.evaluate_script(&script) {
            warn!(session = %self.id, error = %err, "injected javascript failed");
        }
    }

    // =========================================================================
    // MESSAGE BRIDGE
    // =========================================================================

    /// Arm or disarm the page <-> host messaging bridge. No-op when the value
    /// does not change.
    pub fn set_messaging_enabled(&mut self, enabled: bool) {
        if self.messaging_enabled == enabled {
            return;
        }
        self.messaging_enabled = enabled;
        if enabled {
            let events = self.events.clone();
            let target = self.id.clone();
            self.widget.register_bridge(
                bridge::BRIDGE_NAME,
                Arc::new(move |body: String| {
                    events.push(WebViewEvent::Message {
                        target: target.clone(),
                        body,
                    });
                }),
            );
            self.install_bridge();
        } else {
            self.widget.remove_bridge(bridge::BRIDGE_NAME);
            self.bridge_installed = false;
        }
    }

    pub fn messaging_enabled(&self) -> bool {
        self.messaging_enabled
    }

    fn install_bridge(&mut self) {
        if !self.messaging_enabled || self.bridge_installed {
            return;
        }
        if cfg!(debug_assertions) {
            let probe_session = self.id.clone();
            self.widget.evaluate_script_with_result(
                bridge::NATIVE_POSTMESSAGE_PROBE,
                Box::new(move |value| {
                    if value == "true" {
                        warn!(session = %probe_session,
                            "installing the messaging shim overrides window.postMessage, \
                             but a previous value was defined");
                    }
                }),
            );
        }
        if let Err(err) = self.widget.evaluate_script(&bridge::shim_script()) {
            warn!(session = %self.id, error = %err, "bridge shim installation failed");
        }
        self.bridge_installed = true;
    }

    // =========================================================================
    // COMMANDS
    // =========================================================================

    pub fn receive_command(&mut self, command: Command) -> Result<(), CommandError> {
        match command {
            Command::GoBack => {
                self.widget.go_back();
                Ok(())
            }
            Command::GoForward => {
                self.widget.go_forward();
                Ok(())
            }
            Command::Reload => {
                self.widget.reload();
                Ok(())
            }
            Command::StopLoading => {
                self.widget.stop_loading();
                Ok(())
            }
            Command::PostMessage(payload) => {
                let script = bridge::post_message_script(&payload)?;
                self.widget.evaluate_script(&script)?;
                Ok(())
            }
            Command::InjectJavaScript(source) => {
                // Executed verbatim; arbitrary page-context side effects are
                // part of this API's contract.
                self.widget.evaluate_script(&source)?;
                Ok(())
            }
        }
    }

    /// By-name dispatch for framework callers. Unknown names are ignored.
    pub fn receive_named_command(
        &mut self,
        name: &str,
        arg: Option<&str>,
    ) -> Result<(), CommandError> {
        match Command::from_name(name, arg) {
            Some(command) => self.receive_command(command),
            None => {
                debug!(session = %self.id, name, "ignoring unknown command");
                Ok(())
            }
        }
    }

    // =========================================================================
    // FILE UPLOAD
    // =========================================================================

    /// Platform callback: the page requested a file upload. Any stale pending
    /// request is discarded with an empty result.
    pub fn request_upload(&mut self, responder: UploadResponder) -> UploadToken {
        self.chooser.begin(responder)
    }

    /// Platform callback: the chooser flow completed for `token`. Stale or
    /// unknown tokens are ignored.
    pub fn complete_upload(&mut self, token: &UploadToken, results: Vec<String>) -> bool {
        self.chooser.fulfill(token, results)
    }

    // =========================================================================
    // TEARDOWN
    // =========================================================================

    /// Tear the session down. The bridge surface is removed before the widget
    /// is released so no page message can be dispatched against a session
    /// that is mid-teardown.
    pub fn destroy(mut self) {
        if self.messaging_enabled {
            self.widget.remove_bridge(bridge::BRIDGE_NAME);
        }
        self.widget.release();
        debug!(session = %self.id, "session destroyed");
    }
}

// =============================================================================
// TESTS
// =============================================================================
