use crate::foundation::error::{LayerclockError, LayerclockResult};

pub use kurbo::{Affine, Size, Vec2};

/// Smallest duration a scene can resolve to.
///
/// Used when a subtree carries no animations at all, so that a natural duration is never zero
/// and `progress = time / duration` stays defined.
pub const MIN_DURATION: f64 = f64::MIN_POSITIVE;

pub(crate) fn ensure_finite(value: f64, field: &str) -> LayerclockResult<()> {
    if !value.is_finite() {
        return Err(LayerclockError::validation(format!(
            "{field} must be finite (got {value})"
        )));
    }
    Ok(())
}

pub(crate) fn ensure_finite_non_negative(value: f64, field: &str) -> LayerclockResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(LayerclockError::validation(format!(
            "{field} must be finite and >= 0 (got {value})"
        )));
    }
    Ok(())
}
