use crate::{
    foundation::core::MIN_DURATION,
    foundation::error::LayerclockResult,
    scene::model::SceneNode,
};

/// Latest animation end time anywhere in `node`'s subtree, in `node`'s local seconds.
///
/// A node's own animations and its children's results are pooled before taking the maximum.
/// Subtrees without any animation resolve to [`MIN_DURATION`], so the result is always
/// strictly positive.
pub fn natural_duration(node: &SceneNode) -> f64 {
    let own = node.animations.iter().map(|a| a.end_time());
    let nested = node.children.iter().map(natural_duration);
    own.chain(nested).fold(MIN_DURATION, f64::max)
}

/// Validate the tree, then store its natural duration on `root`.
#[tracing::instrument(skip(root), fields(scene = %root.name))]
pub fn resolve_duration(root: &mut SceneNode) -> LayerclockResult<f64> {
    root.validate()?;
    let duration = natural_duration(root);
    root.duration = Some(duration);
    tracing::debug!(duration, nodes = root.node_count(), "resolved natural duration");
    Ok(duration)
}

#[cfg(test)]
#[path = "../../tests/unit/timing/resolver.rs"]
mod tests;
