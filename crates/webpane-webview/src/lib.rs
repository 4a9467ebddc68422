//! Adapter between a platform web-rendering widget and a component-tree UI
//! framework.
//!
//! Provides:
//! - A composition wrapper (`BrowserSession`) owning the widget plus its
//!   bridge and navigation state
//! - A navigation observer that normalizes the widget's page lifecycle into
//!   an ordered event stream (finish always precedes error)
//! - Bidirectional messaging between embedded page JavaScript and the host
//! - An enumerated configuration surface applied in one pass
//! - An asynchronous file-upload request/response side flow
//!
//! The widget itself stays behind the [`PlatformWebView`] trait; this crate
//! never talks to a rendering engine directly.

pub mod bridge;
pub mod chooser;
pub mod config;
pub mod events;
pub mod navigation;
pub mod session;
pub mod widget;

pub use chooser::{FileChooser, UploadToken};
pub use config::{MixedContentMode, PageSource, ViewConfig};
pub use events::{EventSink, PageInfo, WebViewEvent};
pub use session::{BrowserSession, Command};
pub use widget::{BridgeHandler, IntentResolver, PlatformWebView};
