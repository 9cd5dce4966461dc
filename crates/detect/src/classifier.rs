/// Substrings that mark a text as payment-like. Matched case-insensitively.
pub const PAYMENT_KEYWORDS: &[&str] = &[
    "egp",
    "purchase",
    "paid",
    "transfer",
    "instapay",
    "payment",
];

/// Check if a text looks like a payment message.
///
/// Empty and whitespace-only input never matches.
pub fn is_payment_like(text: &str) -> bool {
    if text.trim().is_empty() {
        return false;
    }

    let lower = text.to_lowercase();
    PAYMENT_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
}

/// Trim a candidate text and keep it only if it is non-empty and payment-like.
///
/// This is the single gate used by every event source.
pub fn payment_text(candidate: &str) -> Option<&str> {
    let trimmed = candidate.trim();
    if trimmed.is_empty() || !is_payment_like(trimmed) {
        return None;
    }
    Some(trimmed)
}
