//! Utils

/// Overwrite `slot` when `value` is present; leave it untouched otherwise.
pub(crate) fn overwrite<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

/// Like [`overwrite`], for fields that are themselves optional. A present value sets the
/// field; an absent one never clears it.
pub(crate) fn overwrite_optional<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}
