//! Batch parsing
//!
//! A [`Language`] is immutable and `Sync`, so independent texts can be
//! parsed concurrently against one shared instance. With the `parallel`
//! feature the batch is spread over rayon's thread pool; without it the
//! same functions run sequentially.
//!
//! ```toml
//! [dependencies]
//! modaltext = { version = "0.1", features = ["parallel"] }
//! ```
//!
//! Results are always in input order.

use super::grammar::Language;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Parse multiple inputs in parallel
#[cfg(feature = "parallel")]
pub fn parse_batch<L: Language>(language: &L, inputs: &[&str]) -> Vec<L::Document> {
    log_debug!("parsing batch of {} inputs on rayon", inputs.len());
    inputs.par_iter().map(|input| language.parse(input)).collect()
}

/// Parse multiple inputs sequentially (fallback when rayon is not enabled)
#[cfg(not(feature = "parallel"))]
pub fn parse_batch<L: Language>(language: &L, inputs: &[&str]) -> Vec<L::Document> {
    inputs.iter().map(|input| language.parse(input)).collect()
}

/// Parse multiple owned inputs in parallel
#[cfg(feature = "parallel")]
pub fn parse_batch_owned<L: Language>(language: &L, inputs: Vec<String>) -> Vec<L::Document> {
    inputs
        .into_par_iter()
        .map(|input| language.parse(&input))
        .collect()
}

/// Parse multiple owned inputs sequentially (fallback)
#[cfg(not(feature = "parallel"))]
pub fn parse_batch_owned<L: Language>(language: &L, inputs: Vec<String>) -> Vec<L::Document> {
    inputs
        .into_iter()
        .map(|input| language.parse(&input))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Counts words
    struct Words;

    impl Language for Words {
        type Document = usize;

        fn parse(&self, text: &str) -> usize {
            text.split_whitespace().count()
        }
    }

    #[test]
    fn test_parse_batch_keeps_order() {
        let inputs = ["a", "a b", "", "a b c d"];
        assert_eq!(parse_batch(&Words, &inputs), vec![1, 2, 0, 4]);
    }

    #[test]
    fn test_parse_batch_owned() {
        let inputs: Vec<String> = (0..50).map(|n| "x ".repeat(n)).collect();
        let expected: Vec<usize> = (0..50).collect();
        assert_eq!(parse_batch_owned(&Words, inputs), expected);
    }

    #[test]
    fn test_parse_batch_empty() {
        assert!(parse_batch(&Words, &[]).is_empty());
    }
}
