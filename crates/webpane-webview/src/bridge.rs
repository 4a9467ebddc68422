//! Script construction for the page <-> host messaging bridge.
//!
//! The page-to-host half is a shim installed into the page after every
//! successful load: it saves the page's `window.postMessage` under
//! `window.originalPostMessage` and replaces it with a forwarder into the
//! host-exposed bridge object. The host-to-page half synthesizes a DOM
//! `MessageEvent` and dispatches it on `document`.
//!
//! Whether the shim is currently installed is tracked by the session
//! (`bridge_installed`, reset on every load start) — the script text itself
//! makes no idempotency guarantees: re-running it after the page already
//! wrapped `postMessage` would capture the wrapper as the "original".

/// Name under which the host callable surface is exposed to page script.
pub const BRIDGE_NAME: &str = "__WEBPANE_BRIDGE";

/// Probe evaluated in debug builds before installing the shim. Compares the
/// stringified `window.postMessage` against a known-native function's
/// stringified form (the lodash `isNative` trick). Warn-only; installation
/// proceeds regardless of the result.
pub const NATIVE_POSTMESSAGE_PROBE: &str = "String(window.postMessage) === \
     String(Object.hasOwnProperty).replace('hasOwnProperty', 'postMessage')";

/// The shim that redirects the page's outgoing `postMessage` calls into the
/// host bridge. Arguments are coerced to strings on the page side.
pub fn shim_script() -> String {
    format!(
        "(window.originalPostMessage = window.postMessage,\
         window.postMessage = function(data) {{\
         {BRIDGE_NAME}.postMessage(String(data));\
         }})"
    )
}

/// Wrap host-supplied page script in an IIFE, as run at load finish.
pub fn wrapped_injection_script(js: &str) -> String {
    format!("(function() {{\n{js};\n}})();")
}

/// Build the host-to-page delivery script for one payload.
///
/// The payload is escaped into the JSON object literal `{"data":<payload>}`
/// and dispatched on `document` as a `MessageEvent`, with a fallback to the
/// legacy `document.createEvent` API where the constructor is unavailable.
/// Encoding failure aborts the command and is escalated to the caller.
pub fn post_message_script(payload: &str) -> Result<String, serde_json::Error> {
    let data = serde_json::to_string(&serde_json::json!({ "data": payload }))?;
    Ok(format!(
        "(function () {{\
         var event;\
         var data = {data};\
         try {{\
         event = new MessageEvent('message', data);\
         }} catch (e) {{\
         event = document.createEvent('MessageEvent');\
         event.initMessageEvent('message', true, true, data.data, data.origin, \
         data.lastEventId, data.source);\
         }}\
         document.dispatchEvent(event);\
         }})();"
    ))
}
