//! Inline markdown-to-HTML renderer for assistant replies.
//!
//! Supports a fixed grammar: fenced code blocks, headers levels 1-6,
//! unordered list items, bold, italic, inline code, and line breaks.
//! The output is an HTML fragment meant for injection into a container
//! element, not a complete document.
//!
//! The renderer is an ordered pipeline of pure string-to-string stages.
//! The order is load-bearing: escaping runs first so no raw markup
//! survives into the output, headers match longest-marker-first, and
//! bold runs before italic so `**x**` is not consumed as two italic
//! spans.

use std::sync::OnceLock;

use regex::{Captures, Regex};

/// Renders a markdown subset to an HTML fragment.
///
/// Total over all inputs: malformed or unbalanced markers degrade to
/// literal (escaped) text rather than being rejected. Never panics.
pub fn render(text: &str) -> String {
    let out = escape_html(text);
    let out = replace_code_blocks(&out);
    let out = replace_headers(&out);
    let out = replace_list_items(&out);
    let out = group_list_items(&out);
    let out = replace_emphasis(&out);
    let out = replace_inline_code(&out);
    newlines_to_breaks(&out)
}

/// Escapes raw HTML so message text cannot inject markup.
///
/// `&` must be replaced first; otherwise the entities emitted for `<`
/// and `>` would be escaped a second time.
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Wraps triple-backtick fences in `<pre><code>`.
///
/// The fence body may not contain a backtick, so the first closing
/// fence terminates the block and language tags are not supported.
/// Fence contents remain visible to the later header/list/emphasis
/// stages; the grouping of stages matches the shipped behavior.
fn replace_code_blocks(text: &str) -> String {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    let re = FENCE.get_or_init(|| Regex::new(r"```([^`]+)```").expect("invalid fence regex"));
    re.replace_all(text, "<pre><code>$1</code></pre>")
        .into_owned()
}

/// Converts `#`-prefixed lines into heading elements.
///
/// Levels are matched from 6 down to 1 so `### x` is not taken as a
/// level-1 heading with `##` left over. The marker run must start the
/// line and be followed by exactly one space; seven or more `#` match
/// nothing and stay literal.
fn replace_headers(text: &str) -> String {
    static HEADERS: OnceLock<Vec<(Regex, String)>> = OnceLock::new();
    let rules = HEADERS.get_or_init(|| {
        (1..=6)
            .rev()
            .map(|level| {
                let pattern = format!(r"(?m)^{} (.+)$", "#".repeat(level));
                let replacement = format!("<h{level}>$1</h{level}>");
                (
                    Regex::new(&pattern).expect("invalid header regex"),
                    replacement,
                )
            })
            .collect()
    });

    let mut out = text.to_string();
    for (re, replacement) in rules {
        out = re.replace_all(&out, replacement.as_str()).into_owned();
    }
    out
}

/// Converts `- ` lines into list items.
fn replace_list_items(text: &str) -> String {
    static ITEM: OnceLock<Regex> = OnceLock::new();
    let re = ITEM.get_or_init(|| Regex::new(r"(?m)^- (.+)$").expect("invalid list item regex"));
    re.replace_all(text, "<li>$1</li>").into_owned()
}

/// Wraps each maximal run of list items in a single `<ul>`.
///
/// A run may span whitespace (including the newlines left between
/// items) but nothing else, so two lists separated by a plain line stay
/// separate containers. Only trailing whitespace of the run is
/// stripped; newlines between items survive inside the container.
fn group_list_items(text: &str) -> String {
    static RUN: OnceLock<Regex> = OnceLock::new();
    let re =
        RUN.get_or_init(|| Regex::new(r"(?:<li>.*</li>\s*)+").expect("invalid list run regex"));
    re.replace_all(text, |caps: &Captures<'_>| {
        format!("<ul>{}</ul>", caps[0].trim_end())
    })
    .into_owned()
}

/// Converts `**bold**` spans, then `*italic*` spans.
///
/// Bold must run first so a double-asterisk pair is not consumed as two
/// single-asterisk italic matches. Neither span may contain `*`.
fn replace_emphasis(text: &str) -> String {
    static BOLD: OnceLock<Regex> = OnceLock::new();
    static ITALIC: OnceLock<Regex> = OnceLock::new();
    let bold = BOLD.get_or_init(|| Regex::new(r"\*\*([^*]+)\*\*").expect("invalid bold regex"));
    let italic = ITALIC.get_or_init(|| Regex::new(r"\*([^*]+)\*").expect("invalid italic regex"));

    let out = bold.replace_all(text, "<strong>$1</strong>").into_owned();
    italic.replace_all(&out, "<em>$1</em>").into_owned()
}

/// Converts single-backtick spans into inline code elements.
fn replace_inline_code(text: &str) -> String {
    static CODE: OnceLock<Regex> = OnceLock::new();
    let re = CODE.get_or_init(|| Regex::new(r"`([^`]+)`").expect("invalid inline code regex"));
    re.replace_all(text, "<code>$1</code>").into_owned()
}

/// Converts newlines to `<br>` unless they touch emitted markup.
///
/// A newline directly after `>` or directly before `<` sits against a
/// tag from an earlier stage and is left alone. This is a
/// character-level check, not HTML parsing: literal `<`/`>` from the
/// input are entities by this point and never trigger it.
fn newlines_to_breaks(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    for (i, ch) in text.char_indices() {
        if ch == '\n' && (i == 0 || bytes[i - 1] != b'>') && bytes.get(i + 1) != Some(&b'<') {
            out.push_str("<br>");
        } else {
            out.push(ch);
        }
    }
    out
}
