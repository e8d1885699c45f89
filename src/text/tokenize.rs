// Text normalization and tokenization.
//
// Replicates the tokenization used by the classic ROUGE scoring scripts so
// that novelty and length numbers stay comparable with published baselines:
// lowercase, collapse every non-alphanumeric run to a space, split, stem
// (optional), and keep only `[a-z0-9]+` fragments. The token alphabet is
// deliberately Latin-only — that is a stated limitation, not a bug.

use std::sync::LazyLock;

use regex_lite::Regex;

/// Matches any run of characters outside the token alphabet.
static NON_ALPHANUM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("valid pattern"));

/// Matches runs of whitespace (split boundaries after normalization).
static SPACES_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid pattern"));

/// A surviving fragment must be entirely alphanumeric.
static VALID_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+$").expect("valid pattern"));

/// Suffix-stripping capability injected into the tokenizer.
///
/// One method, so alternative algorithms (or a no-op) can be swapped in
/// without touching the normalization steps around it.
pub trait Stemmer: Send + Sync {
    fn stem(&self, word: &str) -> String;
}

/// Porter-family stemmer backed by the `rust-stemmers` English algorithm.
pub struct PorterStemmer {
    inner: rust_stemmers::Stemmer,
}

impl PorterStemmer {
    pub fn new() -> Self {
        Self {
            inner: rust_stemmers::Stemmer::create(rust_stemmers::Algorithm::English),
        }
    }
}

impl Default for PorterStemmer {
    fn default() -> Self {
        Self::new()
    }
}

impl Stemmer for PorterStemmer {
    fn stem(&self, word: &str) -> String {
        self.inner.stem(word).into_owned()
    }
}

/// Pass-through stemmer. Tokenizing with `Some(&NoopStemmer)` is equivalent
/// to tokenizing with `None`; useful for exercising the stemming code path
/// in tests without depending on the algorithm's output.
pub struct NoopStemmer;

impl Stemmer for NoopStemmer {
    fn stem(&self, word: &str) -> String {
        word.to_string()
    }
}

/// Tokenize a text blob into validated lowercase tokens.
///
/// Steps, in order:
/// 1. lowercase the input
/// 2. replace every non-alphanumeric run with a single space
/// 3. split on whitespace
/// 4. if a stemmer is given, stem fragments longer than 3 characters
/// 5. drop anything that doesn't fully match `[a-z0-9]+`
///
/// Order of the surviving tokens follows the source text left to right.
/// Empty input yields an empty vector.
pub fn tokenize(text: &str, stemmer: Option<&dyn Stemmer>) -> Vec<String> {
    let lowered = text.to_lowercase();
    let normalized = NON_ALPHANUM_RE.replace_all(&lowered, " ");

    SPACES_RE
        .split(&normalized)
        .map(|fragment| match stemmer {
            // Short fragments are left alone — stemming 3-character words
            // does more harm than good.
            Some(s) if fragment.len() > 3 => s.stem(fragment),
            _ => fragment.to_string(),
        })
        .filter(|fragment| VALID_TOKEN_RE.is_match(fragment))
        .collect()
}

/// Count tokens without keeping the sequence around.
pub fn token_count(text: &str) -> usize {
    tokenize(text, None).len()
}
