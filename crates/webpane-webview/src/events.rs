//! Outbound event types and the sink the owning component drains.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use webpane_common::SessionId;

/// Page fields attached to every navigation event. All of them are read live
/// from the widget at event-construction time, never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub url: String,
    /// `true` while the current attempt has not failed and the widget reports
    /// progress below 100.
    pub loading: bool,
    pub title: String,
    pub can_go_back: bool,
    pub can_go_forward: bool,
}

/// Events emitted by a browser session toward the owning component.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum WebViewEvent {
    /// A page load started.
    LoadingStarted { target: SessionId, page: PageInfo },
    /// A page load finished. For failed loads this is synthesized so that
    /// the finish always precedes the error.
    LoadingFinished { target: SessionId, page: PageInfo },
    /// A page load failed.
    LoadingError {
        target: SessionId,
        page: PageInfo,
        code: i32,
        description: String,
    },
    /// The widget's visited history changed.
    HistoryUpdated { target: SessionId, page: PageInfo },
    /// The embedded page posted a message through the bridge.
    Message { target: SessionId, body: String },
}

impl WebViewEvent {
    pub fn target(&self) -> &SessionId {
        match self {
            Self::LoadingStarted { target, .. }
            | Self::LoadingFinished { target, .. }
            | Self::LoadingError { target, .. }
            | Self::HistoryUpdated { target, .. }
            | Self::Message { target, .. } => target,
        }
    }
}

/// Event sink shared between a session and its owning component. Events are
/// pushed from widget callbacks and drained on the UI loop, FIFO.
#[derive(Clone, Default)]
pub struct EventSink {
    inner: Arc<Mutex<Vec<WebViewEvent>>>,
}

impl EventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, event: WebViewEvent) {
        if let Ok(mut events) = self.inner.lock() {
            events.push(event);
        }
    }

    /// Drain all pending events.
    pub fn drain(&self) -> Vec<WebViewEvent> {
        match self.inner.lock() {
            Ok(mut events) => std::mem::take(&mut *events),
            Err(_) => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> PageInfo {
        PageInfo {
            url: "https://example.com".into(),
            loading: false,
            title: "Example".into(),
            can_go_back: false,
            can_go_forward: false,
        }
    }

    #[test]
    fn sink_preserves_order() {
        let sink = EventSink::new();
        let target = SessionId::new();
        sink.push(WebViewEvent::LoadingStarted {
            target: target.clone(),
            page: page(),
        });
        sink.push(WebViewEvent::LoadingFinished {
            target: target.clone(),
            page: page(),
        });

        let drained = sink.drain();
        assert_eq!(drained.len(), 2);
        assert!(matches!(drained[0], WebViewEvent::LoadingStarted { .. }));
        assert!(matches!(drained[1], WebViewEvent::LoadingFinished { .. }));
    }

    #[test]
    fn drain_empties_the_sink() {
        let sink = EventSink::new();
        sink.push(WebViewEvent::Message {
            target: SessionId::new(),
            body: "hello".into(),
        });
        assert_eq!(sink.drain().len(), 1);
        assert!(sink.drain().is_empty());
    }

    #[test]
    fn clones_share_the_same_queue() {
        let sink = EventSink::new();
        let other = sink.clone();
        other.push(WebViewEvent::Message {
            target: SessionId::new(),
            body: "via clone".into(),
        });
        assert_eq!(sink.drain().len(), 1);
    }

    #[test]
    fn target_accessor_covers_all_variants() {
        let target = SessionId::new();
        let event = WebViewEvent::LoadingError {
            target: target.clone(),
            page: page(),
            code: -2,
            description: "net::ERR_NAME_NOT_RESOLVED".into(),
        };
        assert_eq!(event.target(), &target);
    }

    #[test]
    fn events_serialize_tagged() {
        let event = WebViewEvent::Message {
            target: SessionId::new(),
            body: "hi".into(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"Message\""));
    }
}
