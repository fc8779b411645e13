//! Tab completion

/// First candidate, in table order, that starts with `prefix`.
///
/// An empty prefix matches the first candidate.
pub fn complete<'a, I>(prefix: &str, candidates: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    candidates.into_iter().find(|c| c.starts_with(prefix))
}
