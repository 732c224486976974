use crate::{
    foundation::core::{Affine, Size, Vec2},
    foundation::error::{LayerclockError, LayerclockResult},
};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
/// Uniform scale plus centering translation that fits content into a viewport.
pub struct FitTransform {
    /// Uniform scale factor.
    pub ratio: f64,
    /// Translation applied after scaling.
    pub translate: Vec2,
}

impl FitTransform {
    /// Scale first, then translate.
    pub fn to_affine(self) -> Affine {
        Affine::translate(self.translate) * Affine::scale(self.ratio)
    }
}

/// Fit `content` into `viewport`, preserving aspect ratio and centering on both axes.
///
/// `content` must be strictly positive; an empty viewport yields a zero ratio.
pub fn fit_transform(content: Size, viewport: Size) -> LayerclockResult<FitTransform> {
    for (name, v) in [("width", content.width), ("height", content.height)] {
        if !v.is_finite() || v <= 0.0 {
            return Err(LayerclockError::validation(format!(
                "content {name} must be finite and > 0 (got {v})"
            )));
        }
    }
    for (name, v) in [("width", viewport.width), ("height", viewport.height)] {
        if !v.is_finite() || v < 0.0 {
            return Err(LayerclockError::validation(format!(
                "viewport {name} must be finite and >= 0 (got {v})"
            )));
        }
    }

    let ratio = (viewport.width / content.width).min(viewport.height / content.height);
    let translate = Vec2::new(
        (viewport.width - content.width * ratio) / 2.0,
        (viewport.height - content.height * ratio) / 2.0,
    );
    Ok(FitTransform { ratio, translate })
}

#[cfg(test)]
#[path = "../../tests/unit/layout/fit.rs"]
mod tests;
