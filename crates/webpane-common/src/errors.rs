/// Failures reported by the platform web widget. The widget itself is an
/// external collaborator; these carry its reason text through unchanged.
#[derive(Debug, thiserror::Error)]
pub enum WidgetError {
    #[error("script evaluation failed: {0}")]
    Script(String),

    #[error("page load failed: {0}")]
    Load(String),

    #[error("no handler for url: {0}")]
    NoHandler(String),

    #[error("widget unavailable: {0}")]
    Unavailable(String),
}

/// Failures while executing an imperative command against a session.
/// Navigation errors are not represented here — they arrive as events.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("message payload encoding failed: {0}")]
    PayloadEncoding(#[from] serde_json::Error),

    #[error(transparent)]
    Widget(#[from] WidgetError),
}
