//! Enumerated session configuration.
//!
//! Every recognized option and its effect is spelled out here and applied in
//! one pass by `BrowserSession::apply_configuration` — there is no dynamic
//! setter dispatch.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Mixed-content policy for pages loaded over https.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MixedContentMode {
    /// Block insecure subresources entirely.
    #[default]
    Never,
    /// Allow insecure subresources.
    Always,
    /// Platform compatibility heuristics.
    Compatibility,
}

/// What the widget should display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PageSource {
    /// Inline HTML, optionally resolved against a base URL.
    Html {
        html: String,
        #[serde(default)]
        base_url: Option<String>,
    },
    /// A remote or local document.
    Uri {
        uri: String,
        /// Only `POST` changes behavior; anything else loads as GET.
        #[serde(default)]
        method: Option<String>,
        /// Request body for `POST` loads.
        #[serde(default)]
        body: Option<String>,
        /// Extra request headers. A `user-agent` entry (any case) is applied
        /// as the widget user agent instead of being forwarded.
        #[serde(default)]
        headers: HashMap<String, String>,
    },
}

/// Full set of capability flags the host framework can set on a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub javascript_enabled: bool,
    pub dom_storage_enabled: bool,
    pub user_agent: Option<String>,
    pub mixed_content: MixedContentMode,
    /// When `false` the widget uses its wide-viewport layout.
    pub scales_page_to_fit: bool,
    pub media_playback_requires_gesture: bool,
    pub allow_universal_access_from_file_urls: bool,
    pub save_form_data_disabled: bool,
    /// Allow `<input type=file>` capture flows.
    pub upload_capture_enabled: bool,
    /// Script run in the page at every successful load finish.
    pub injected_javascript: Option<String>,
    /// Arms the page <-> host messaging bridge.
    pub messaging_enabled: bool,
    /// `None` resets the widget to `about:blank`.
    pub source: Option<PageSource>,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            javascript_enabled: true,
            dom_storage_enabled: true,
            user_agent: None,
            mixed_content: MixedContentMode::Never,
            scales_page_to_fit: true,
            media_playback_requires_gesture: true,
            allow_universal_access_from_file_urls: false,
            save_form_data_disabled: false,
            upload_capture_enabled: true,
            injected_javascript: None,
            messaging_enabled: false,
            source: None,
        }
    }
}
