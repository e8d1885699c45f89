// Text processing primitives shared by every metric.

pub mod ngrams;
pub mod sentences;
pub mod tokenize;
