use crate::{
    foundation::core::{Size, ensure_finite_non_negative},
    foundation::error::{LayerclockError, LayerclockResult},
    timing::virtualization::TimeVirtualization,
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A keyframe animation attached to a node.
///
/// Only the timing envelope matters here; the keyframe payload is interpreted by the renderer.
pub struct KeyframeAnimation {
    /// Animation key (unique per node by convention).
    pub key: String,
    /// Start time on the owning node's local clock, in seconds.
    #[serde(default)]
    pub begin_time: f64,
    /// Active span in seconds.
    pub duration: f64,
}

impl KeyframeAnimation {
    /// Build an animation envelope.
    pub fn new(key: impl Into<String>, begin_time: f64, duration: f64) -> Self {
        Self {
            key: key.into(),
            begin_time,
            duration,
        }
    }

    /// Local time at which the animation finishes.
    pub fn end_time(&self) -> f64 {
        self.begin_time + self.duration
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// One element of the animated layer hierarchy.
///
/// Children are owned by their parent, so a tree can never contain a cycle or share a node.
pub struct SceneNode {
    /// Node name for debugging and error paths.
    #[serde(default)]
    pub name: String,
    /// Intrinsic bounding size in layer units.
    #[serde(default)]
    pub bounds: Size,
    /// Local time virtualization.
    #[serde(default)]
    pub timing: TimeVirtualization,
    /// Animations authored against this node's local clock.
    #[serde(default)]
    pub animations: Vec<KeyframeAnimation>,
    /// Child nodes in paint order.
    #[serde(default)]
    pub children: Vec<SceneNode>,
    /// Natural duration of the subtree; `None` until resolved.
    ///
    /// Never read from or written to JSON: only the resolver sets it.
    #[serde(skip)]
    pub duration: Option<f64>,
}

impl SceneNode {
    /// Create an empty node.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the intrinsic bounding size.
    pub fn with_bounds(mut self, width: f64, height: f64) -> Self {
        self.bounds = Size::new(width, height);
        self
    }

    /// Attach an animation envelope.
    pub fn with_animation(
        mut self,
        key: impl Into<String>,
        begin_time: f64,
        duration: f64,
    ) -> Self {
        self.animations
            .push(KeyframeAnimation::new(key, begin_time, duration));
        self
    }

    /// Append a child node.
    pub fn with_child(mut self, child: SceneNode) -> Self {
        self.children.push(child);
        self
    }

    /// Set the local time virtualization.
    pub fn with_timing(mut self, timing: TimeVirtualization) -> Self {
        self.timing = timing;
        self
    }

    /// Resolved natural duration, if any.
    pub fn duration(&self) -> Option<f64> {
        self.duration
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(SceneNode::node_count).sum::<usize>()
    }

    /// Depth of this subtree; a leaf has depth 1.
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(SceneNode::depth).max().unwrap_or(0)
    }

    /// Validate the whole subtree.
    ///
    /// Errors name the offending node by its slash-separated path from `self`.
    pub fn validate(&self) -> LayerclockResult<()> {
        let mut path = Vec::new();
        validate_node(self, &mut path)
    }
}

fn display_name(node: &SceneNode, index: Option<usize>) -> String {
    match (node.name.trim().is_empty(), index) {
        (false, _) => node.name.clone(),
        (true, Some(i)) => format!("#{i}"),
        (true, None) => "<root>".to_string(),
    }
}

fn validate_node(node: &SceneNode, path: &mut Vec<String>) -> LayerclockResult<()> {
    if path.is_empty() {
        path.push(display_name(node, None));
    }
    let here = path.join("/");

    node.timing
        .validate()
        .map_err(|e| with_path(e, &here, "timing"))?;

    for (name, value) in [("width", node.bounds.width), ("height", node.bounds.height)] {
        ensure_finite_non_negative(value, name).map_err(|e| with_path(e, &here, "bounds"))?;
    }

    for anim in &node.animations {
        let field = format!("animation '{}'", anim.key);
        ensure_finite_non_negative(anim.begin_time, "begin_time")
            .map_err(|e| with_path(e, &here, &field))?;
        ensure_finite_non_negative(anim.duration, "duration")
            .map_err(|e| with_path(e, &here, &field))?;
        if !anim.end_time().is_finite() {
            return Err(LayerclockError::validation(format!(
                "node '{here}' {field}: end time overflows (begin_time {} + duration {})",
                anim.begin_time, anim.duration
            )));
        }
    }

    if let Some(d) = node.duration
        && (!d.is_finite() || d <= 0.0)
    {
        return Err(LayerclockError::validation(format!(
            "node '{here}' resolved duration must be finite and > 0 (got {d})"
        )));
    }

    for (idx, child) in node.children.iter().enumerate() {
        path.push(display_name(child, Some(idx)));
        let res = validate_node(child, path);
        path.pop();
        res?;
    }
    Ok(())
}

fn with_path(err: LayerclockError, path: &str, what: &str) -> LayerclockError {
    match err {
        LayerclockError::Validation(msg) => {
            LayerclockError::validation(format!("node '{path}' {what}: {msg}"))
        }
        other => other,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
