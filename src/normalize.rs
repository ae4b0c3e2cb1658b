//! Title normalization seam for duplicate grouping.

/// Maps a parsed title and year to a canonical form.
///
/// Implementations may consult an external catalogue to merge spelling
/// variants of the same movie. Normalization runs only on titles whose
/// cheap grouping key already collided at least once, and it must never
/// fail the scan: on lookup problems return the input unchanged.
pub trait TitleNormalizer {
    fn normalize(&self, title: &str, year: Option<u16>) -> (String, Option<u16>);
}

/// Identity normalizer, used when no external catalogue is wanted.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNormalizer;

impl TitleNormalizer for NoopNormalizer {
    fn normalize(&self, title: &str, year: Option<u16>) -> (String, Option<u16>) {
        (title.to_string(), year)
    }
}
