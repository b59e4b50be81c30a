use super::*;

#[test]
fn parse_decomposes_fields() {
    let t: ClockInstant = "23:59:58.250".parse().unwrap();
    assert_eq!(t.hour(), 23);
    assert_eq!(t.minute(), 59);
    assert_eq!(t.second(), 58);
    assert_eq!(t.millis(), 250);
    assert_eq!(t.to_string(), "23:59:58.250");

    let short: ClockInstant = "07:05:09.5".parse().unwrap();
    assert_eq!(short.millis(), 500);
}

#[test]
fn parse_rejects_garbage() {
    for bad in ["", "12", "12:00", "24:00:00", "12:60:00", "1:2:3:4", "12:00:00.", "12:00:00.1234"] {
        assert!(bad.parse::<ClockInstant>().is_err(), "accepted '{bad}'");
    }
}

#[test]
fn plus_seconds_wraps_time_of_day_but_stays_monotonic() {
    let t = ClockInstant::from_hms(23, 59, 59, 0).unwrap();
    let next = t.plus_seconds(1);
    assert!(next > t);
    assert_eq!((next.hour(), next.minute(), next.second()), (0, 0, 0));
    assert_eq!(next.second_index(), t.second_index() + 1);
}

#[test]
fn floor_and_elapsed() {
    let t = ClockInstant(12_345);
    assert_eq!(t.floor_second(), ClockInstant(12_000));
    assert_eq!(t.millis_since(ClockInstant(12_000)), 345);
    assert_eq!(ClockInstant(5).millis_since(ClockInstant(10)), 0);
}
