/// Quota limits declared by a provider tier.
///
/// `None` means the limit is not enforced.
pub trait Tier: Send + Sync {
    /// Requests per minute.
    fn rpm(&self) -> Option<u32>;

    /// Tokens per minute.
    fn tpm(&self) -> Option<u64>;

    /// Requests per day.
    fn rpd(&self) -> Option<u32>;

    /// Requests in flight at once.
    fn max_concurrent(&self) -> Option<u32>;

    /// Display name, e.g. "Free".
    fn name(&self) -> &str;
}
