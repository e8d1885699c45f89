// Sentence splitting for the focus metric.
//
// The position-salience computation only needs sentence boundaries in news
// prose, so this is a terminator-based splitter, not a full segmenter:
// a sentence ends at a run of `.`, `!` or `?` followed by whitespace or
// end of text. Abbreviation handling is out of scope.

use std::sync::LazyLock;

use regex_lite::Regex;

static SENTENCE_END_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+(\s+|$)").expect("valid pattern"));

/// Split a text blob into trimmed, non-empty sentences in source order.
pub fn split_sentences(text: &str) -> Vec<String> {
    SENTENCE_END_RE
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
