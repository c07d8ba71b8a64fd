use north_node::houses::{classify, HouseCuspSet};

/// Unequal cusps with house 12 spanning 350° -> 5°
fn wrapping_cusps() -> HouseCuspSet {
    HouseCuspSet::new([5.0, 31.0, 58.0, 84.0, 118.0, 152.0, 185.0, 211.0, 238.0, 264.0, 298.0, 350.0])
}

#[test]
fn test_house_twelve_wraps_through_aries() {
    let cusps = wrapping_cusps();
    assert_eq!(classify(358.0, &cusps).house, 12);
    assert_eq!(classify(2.0, &cusps).house, 12);
    assert_eq!(classify(0.0, &cusps).house, 12);
    assert_ne!(classify(10.0, &cusps).house, 12);
    assert_eq!(classify(10.0, &cusps).house, 1);
}

#[test]
fn test_interior_points_land_in_their_span() {
    let cusps = wrapping_cusps();
    for i in 0..11 {
        let (start, end) = cusps.span(i);
        let mid = (start + end) / 2.0;
        let assignment = classify(mid, &cusps);
        assert_eq!(assignment.house as usize, i + 1, "midpoint {mid}");
        assert!(!assignment.fallback);
        assert_eq!(classify(start, &cusps).house as usize, i + 1, "cusp {start}");
    }
}

#[test]
fn test_every_degree_gets_a_house() {
    let cusps = wrapping_cusps();
    let mut seen = [false; 12];
    for tenth in 0..3600 {
        let assignment = classify(tenth as f64 / 10.0, &cusps);
        assert!((1..=12).contains(&assignment.house));
        assert!(!assignment.fallback);
        seen[assignment.house as usize - 1] = true;
    }
    assert!(seen.iter().all(|s| *s));
}

#[test]
fn test_wrap_in_the_middle_of_the_wheel() {
    // Ascendant in Sagittarius: the wrap falls in house 4
    let cusps = HouseCuspSet::new([
        250.0, 282.0, 318.0, 352.0, 20.0, 46.0, 70.0, 102.0, 138.0, 172.0, 200.0, 226.0,
    ]);
    assert_eq!(classify(355.0, &cusps).house, 4);
    assert_eq!(classify(15.0, &cusps).house, 4);
    assert_eq!(classify(20.0, &cusps).house, 5);
    assert_eq!(classify(249.9, &cusps).house, 12);
}

#[test]
fn test_no_global_ordering_assumed() {
    // Out-of-order cusps still answer from per-span comparisons only
    let cusps = HouseCuspSet::new([
        10.0, 40.0, 30.0, 90.0, 120.0, 150.0, 180.0, 210.0, 240.0, 270.0, 300.0, 330.0,
    ]);
    assert_eq!(classify(35.0, &cusps).house, 1);
    // House 2 wraps from 40° through 0° to 30° and catches everything else first
    assert_eq!(classify(100.0, &cusps).house, 2);
}

#[test]
fn test_degenerate_cusps_report_fallback() {
    let assignment = classify(123.0, &HouseCuspSet::new([0.0; 12]));
    assert_eq!(assignment.house, 1);
    assert!(assignment.fallback);
}
