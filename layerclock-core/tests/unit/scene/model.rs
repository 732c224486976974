use super::*;

fn checkmark() -> SceneNode {
    SceneNode::new("root")
        .with_bounds(120.0, 120.0)
        .with_animation("fade", 0.0, 3.0)
        .with_child(
            SceneNode::new("stroke")
                .with_animation("strokeEnd", 2.0, 5.0)
                .with_child(SceneNode::new("tip")),
        )
        .with_child(SceneNode::new("ring"))
}

#[test]
fn builders_populate_tree() {
    let root = checkmark();
    assert_eq!(root.node_count(), 4);
    assert_eq!(root.depth(), 3);
    assert_eq!(root.children[0].animations[0].end_time(), 7.0);
    assert_eq!(root.duration(), None);
    assert_eq!(root.bounds, Size::new(120.0, 120.0));
}

#[test]
fn valid_tree_passes() {
    checkmark().validate().unwrap();
}

#[test]
fn negative_animation_time_is_reported_with_path() {
    let mut root = checkmark();
    root.children[0].animations[0].begin_time = -1.0;
    let err = root.validate().unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("validation error:"), "{msg}");
    assert!(msg.contains("root/stroke"), "{msg}");
    assert!(msg.contains("strokeEnd"), "{msg}");
}

#[test]
fn negative_speed_is_rejected() {
    let mut root = checkmark();
    root.children[1].timing.speed = -2.0;
    let msg = root.validate().unwrap_err().to_string();
    assert!(msg.contains("root/ring"), "{msg}");
    assert!(msg.contains("speed"), "{msg}");
}

#[test]
fn unnamed_nodes_use_index_in_path() {
    let root = SceneNode::default()
        .with_child(SceneNode::default())
        .with_child(SceneNode::default().with_animation("a", 0.0, f64::NAN));
    let msg = root.validate().unwrap_err().to_string();
    assert!(msg.contains("<root>/#1"), "{msg}");
}

#[test]
fn json_defaults_fill_missing_fields() {
    let node: SceneNode = serde_json::from_str(
        r#"{
            "name": "root",
            "children": [ { "animations": [ { "key": "k", "duration": 2.0 } ] } ]
        }"#,
    )
    .unwrap();
    assert_eq!(node.timing.speed, 1.0);
    assert_eq!(node.children[0].animations[0].begin_time, 0.0);
    assert!(node.duration.is_none());

    let out = serde_json::to_value(&node).unwrap();
    assert!(out.get("duration").is_none());
}

#[test]
fn preresolved_zero_duration_is_rejected() {
    let mut root = checkmark();
    root.duration = Some(0.0);
    let msg = root.validate().unwrap_err().to_string();
    assert!(msg.contains("resolved duration"), "{msg}");
    root.duration = Some(7.0);
    root.validate().unwrap();
}

#[test]
fn overflowing_end_time_is_rejected() {
    let mut root = checkmark();
    root.children[0].animations[0].begin_time = f64::MAX;
    root.children[0].animations[0].duration = f64::MAX;
    let msg = root.validate().unwrap_err().to_string();
    assert!(msg.contains("root/stroke"), "{msg}");
    assert!(msg.contains("end time overflows"), "{msg}");
}

#[test]
fn json_duration_is_ignored() {
    let node: SceneNode = serde_json::from_str(r#"{ "name": "root", "duration": 4.0 }"#).unwrap();
    assert_eq!(node.duration(), None);
}
