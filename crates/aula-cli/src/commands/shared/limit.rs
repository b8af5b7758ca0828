/// The `--limit` flag, falling back to the configured default.
#[must_use]
pub fn effective_limit(global: Option<u32>, configured: u32) -> usize {
    usize::try_from(global.unwrap_or(configured)).unwrap_or(usize::MAX)
}
