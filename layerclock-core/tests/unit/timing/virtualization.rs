use super::*;

fn tv(time_offset: f64, begin_time: f64, speed: f64) -> TimeVirtualization {
    TimeVirtualization {
        time_offset,
        begin_time,
        speed,
        ..TimeVirtualization::default()
    }
}

#[test]
fn default_is_identity_mapping() {
    let t = TimeVirtualization::default();
    assert_eq!(t.local_time(0.0), 0.0);
    assert_eq!(t.local_time(12.5), 12.5);
    assert_eq!(t.state(), PlaybackState::Playing);
}

#[test]
fn local_time_applies_begin_speed_and_offset() {
    let t = tv(1.0, 10.0, 2.0);
    assert_eq!(t.local_time(10.0), 1.0);
    assert_eq!(t.local_time(13.0), 7.0);
}

#[test]
fn frozen_node_reports_offset_regardless_of_time() {
    let t = tv(2.25, 100.0, 0.0);
    assert_eq!(t.local_time(0.0), 2.25);
    assert_eq!(t.local_time(1e6), 2.25);
}

#[test]
fn state_is_derived_from_triple() {
    assert_eq!(tv(0.0, 0.0, 0.0).state(), PlaybackState::Stopped);
    assert_eq!(tv(0.5, 0.0, 0.0).state(), PlaybackState::Paused);
    assert_eq!(tv(0.5, 3.0, 1.0).state(), PlaybackState::Playing);
    assert_eq!(tv(0.0, 3.0, 0.25).state(), PlaybackState::Playing);
}

#[test]
fn chain_composes_multiplicatively() {
    let root = tv(0.0, 10.0, 1.0);
    let child = tv(0.0, 1.0, 2.0);
    // root local = 5, child local = (5 - 1) * 2
    assert_eq!(local_time_through([&root, &child], 15.0), 8.0);

    let frozen_root = tv(3.0, 10.0, 0.0);
    assert_eq!(local_time_through([&frozen_root, &child], 99.0), 4.0);
    let none: &[TimeVirtualization] = &[];
    assert_eq!(local_time_through(none, 7.0), 7.0);
}

#[test]
fn validate_rejects_negative_speed_and_nan() {
    assert!(TimeVirtualization::default().validate().is_ok());
    assert!(tv(0.0, 0.0, -1.0).validate().is_err());
    assert!(tv(f64::NAN, 0.0, 1.0).validate().is_err());
    assert!(tv(0.0, -4.0, 1.0).validate().is_ok());
}

#[test]
fn deserialize_defaults_speed_to_one() {
    let t: TimeVirtualization = serde_json::from_str(r#"{ "time_offset": 1.5 }"#).unwrap();
    assert_eq!(t.speed, 1.0);
    assert_eq!(t.time_offset, 1.5);
    assert_eq!(t.begin_time, 0.0);
}
