use crate::error::StoreResult;

/// Bidirectional value/hash mapping consumed by the reference hashers.
///
/// All implementations must satisfy these invariants:
/// - A value maps to at most one hash and a hash to at most one value.
/// - `resolve` and `hash` are pure functions of the store contents at call
///   time; concurrent calls are safe.
/// - `put` never replaces an existing entry.
pub trait HashStore: Send + Sync {
    /// Name used in diagnostics (e.g. `"classpath"`).
    fn name(&self) -> &str;

    /// Resolve a hash token back to its original value.
    ///
    /// Returns `Ok(None)` if the token is unknown.
    fn resolve(&self, hash: &str) -> StoreResult<Option<String>>;

    /// Look up the hash token registered for `value`.
    ///
    /// Returns `Ok(None)` if the value has no token.
    fn hash(&self, value: &str) -> StoreResult<Option<String>>;

    /// Register `value -> hash`.
    ///
    /// Registering an identical entry again is a no-op. Fails with
    /// `StoreError::Conflict` if either side is already bound elsewhere.
    fn put(&self, value: &str, hash: &str) -> StoreResult<()>;

    /// All `(value, hash)` entries, sorted by value.
    fn entries(&self) -> StoreResult<Vec<(String, String)>>;

    /// Returns `true` if `hash` resolves to a value.
    fn contains_hash(&self, hash: &str) -> StoreResult<bool> {
        Ok(self.resolve(hash)?.is_some())
    }
}
