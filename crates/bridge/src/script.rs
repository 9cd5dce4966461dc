//! Script building for the web hooks.
//!
//! Every push is a guarded call of a global function, so an undefined hook is
//! a no-op on the web side:
//!
//! ```text
//! window.onNativePaymentMessage && window.onNativePaymentMessage("...","sms_inbox");
//! ```

use paybridge_events::{PaymentMessageEvent, PermissionSnapshot};

/// JSON-quote `value` for embedding as a JavaScript string literal.
pub fn quote_js_string(value: &str) -> String {
    let quoted = serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string());
    escape_for_script(&quoted)
}

/// JSON allows U+2028/U+2029 unescaped and older engines reject them in
/// literals; `</` would close an enclosing script element.
fn escape_for_script(json: &str) -> String {
    json.replace('\u{2028}', "\\u2028")
        .replace('\u{2029}', "\\u2029")
        .replace("</", "<\\/")
}

/// `window.<hook> && window.<hook>(<args>);` with pre-serialized arguments.
pub fn hook_call(hook: &str, args: &[&str]) -> String {
    format!("window.{hook} && window.{hook}({});", args.join(","))
}

pub fn payment_message_script(hook: &str, event: &PaymentMessageEvent) -> String {
    let message = quote_js_string(&event.raw_message);
    let source = quote_js_string(event.source.as_str());
    hook_call(hook, &[&message, &source])
}

pub fn permissions_update_script(
    hook: &str,
    snapshot: &PermissionSnapshot,
) -> Result<String, serde_json::Error> {
    let payload = escape_for_script(&snapshot.to_json()?);
    Ok(hook_call(hook, &[&payload]))
}
