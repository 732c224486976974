use super::*;
use crate::foundation::error::LayerclockError;

#[test]
fn leaf_takes_latest_end_time() {
    let leaf = SceneNode::new("leaf")
        .with_animation("a", 0.0, 2.0)
        .with_animation("b", 1.0, 4.0);
    assert_eq!(natural_duration(&leaf), 5.0);
}

#[test]
fn empty_tree_resolves_to_positive_epsilon() {
    let mut root = SceneNode::new("root").with_child(SceneNode::new("empty"));
    let d = resolve_duration(&mut root).unwrap();
    assert!(d > 0.0);
    assert_eq!(d, MIN_DURATION);
    assert_eq!(root.duration, Some(MIN_DURATION));
}

#[test]
fn internal_node_animations_join_children() {
    let root = SceneNode::new("root")
        .with_animation("fade", 0.0, 3.0)
        .with_child(SceneNode::new("stroke").with_animation("draw", 2.0, 5.0));
    assert_eq!(natural_duration(&root), 7.0);

    let root = SceneNode::new("root")
        .with_animation("long", 0.0, 9.0)
        .with_child(SceneNode::new("stroke").with_animation("draw", 2.0, 5.0));
    assert_eq!(natural_duration(&root), 9.0);
}

#[test]
fn deep_nesting_is_traversed() {
    let mut node = SceneNode::new("leaf").with_animation("deep", 4.0, 4.5);
    for i in 0..16 {
        node = SceneNode::new(format!("level{i}")).with_child(node);
    }
    let mut root = SceneNode::new("root")
        .with_child(SceneNode::new("short").with_animation("s", 0.0, 1.0))
        .with_child(node);
    assert_eq!(resolve_duration(&mut root).unwrap(), 8.5);
}

#[test]
fn zero_length_animations_still_count() {
    let root = SceneNode::new("root").with_animation("marker", 2.0, 0.0);
    assert_eq!(natural_duration(&root), 2.0);
}

#[test]
fn only_root_duration_is_written() {
    let mut root =
        SceneNode::new("root").with_child(SceneNode::new("c").with_animation("a", 0.0, 1.0));
    resolve_duration(&mut root).unwrap();
    assert_eq!(root.duration, Some(1.0));
    assert_eq!(root.children[0].duration, None);
}

#[test]
fn structural_violation_fails_resolution() {
    let mut root =
        SceneNode::new("root").with_child(SceneNode::new("bad").with_animation("a", 0.0, -2.0));
    let err = resolve_duration(&mut root).unwrap_err();
    assert!(matches!(err, LayerclockError::Validation(_)));
    assert_eq!(root.duration, None);
}

#[test]
fn overflowing_end_time_fails_resolution() {
    let mut root = SceneNode::new("root")
        .with_child(SceneNode::new("far").with_animation("a", 1e308, 1e308));
    let err = resolve_duration(&mut root).unwrap_err();
    assert!(matches!(err, LayerclockError::Validation(_)));
    assert!(err.to_string().contains("root/far"), "{err}");
    assert_eq!(root.duration, None);
}
