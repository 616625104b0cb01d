//! Relapse-marker post-processing
//!
//! Persona prompts instruct the model to emit `<|relapse|>` on its own
//! line when the user appears to have relapsed. The flag fires whenever
//! the marker appears anywhere; stripping only removes the exact
//! newline(s)-then-marker pattern, so an inline marker stays visible.
//! Clients depend on both halves of that contract.

use once_cell::sync::Lazy;
use regex::Regex;

/// Control token the model emits to signal a detected relapse
pub const RELAPSE_MARKER: &str = "<|relapse|>";

static STRIP_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\n+<\|relapse\|>").expect("valid marker pattern")
});

/// Split raw model output into display text and a relapse flag
pub fn process_response(raw: &str) -> (String, bool) {
    let relapsed = raw.contains(RELAPSE_MARKER);
    let display = STRIP_RE.replace_all(raw, "").into_owned();
    (display, relapsed)
}
