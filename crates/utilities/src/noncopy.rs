//! Marker for types that must never be duplicated.

/// Zero-sized field that opts its host type out of `Clone` and `Copy`.
///
/// Rust types are move-only by default; embedding this marker additionally turns an
/// accidental `#[derive(Clone)]` on the host into a compile error naming the host type.
///
/// ```compile_fail
/// use emulator_utilities::NonCopyable;
///
/// #[derive(Clone)]
/// struct Handle {
///     _noncopy: NonCopyable,
/// }
/// ```
#[derive(Debug, Default, PartialEq, Eq, Hash)]
pub struct NonCopyable {
    _private: (),
}

impl NonCopyable {
    /// Creates the marker.
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }
}
