use super::*;

#[test]
fn spinner_label_appends_percent_sign() {
    assert_eq!(spinner_label(0), "0%");
    assert_eq!(spinner_label(42), "42%");
    assert_eq!(spinner_label(100), "100%");
}

#[test]
fn arc_length_scales_with_percent() {
    assert!(arc_length(0).abs() < f64::EPSILON);
    let full = arc_length(100);
    assert!((arc_length(50) * 2.0 - full).abs() < 1e-9);
}

#[test]
fn arc_length_caps_at_full_circle() {
    assert!((arc_length(250) - arc_length(100)).abs() < f64::EPSILON);
}
