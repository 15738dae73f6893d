use super::*;

#[test]
fn zero_lag_is_direct() {
    let mut s = ScrubSmoother::new(0.0);
    assert_eq!(s.follow(0.3, 0.016), 0.3);
    assert_eq!(s.follow(0.9, 0.016), 0.9);
    assert_eq!(s.follow(0.1, 0.016), 0.1);
}

#[test]
fn first_sample_starts_at_raw() {
    let mut s = ScrubSmoother::new(1.0);
    assert_eq!(s.follow(0.6, 0.016), 0.6);
}

#[test]
fn lag_closes_ninety_nine_percent_within_lag_seconds() {
    let mut s = ScrubSmoother::new(1.0);
    s.follow(0.0, 0.0);
    let mut v = 0.0;
    for _ in 0..60 {
        v = s.follow(1.0, 1.0 / 60.0);
    }
    assert!(v >= 0.99 - 1e-9, "{v}");
    assert!(v <= 1.0);
}

#[test]
fn lagging_value_moves_toward_raw_without_passing_it() {
    let mut s = ScrubSmoother::new(0.5);
    s.follow(1.0, 0.0);
    let a = s.follow(0.0, 0.016);
    let b = s.follow(0.0, 0.016);
    assert!(a < 1.0 && a > 0.0);
    assert!(b < a && b >= 0.0);
}

#[test]
fn reset_snaps_to_next_raw() {
    let mut s = ScrubSmoother::new(2.0);
    s.follow(0.0, 0.0);
    s.follow(1.0, 0.016);
    s.reset();
    assert_eq!(s.follow(0.4, 0.016), 0.4);
}

#[test]
fn zero_dt_holds_value() {
    let mut s = ScrubSmoother::new(1.0);
    s.follow(0.0, 0.0);
    assert_eq!(s.follow(1.0, 0.0), 0.0);
    assert_eq!(s.follow(1.0, -1.0), 0.0);
}
