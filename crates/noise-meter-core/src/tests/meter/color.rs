use crate::{ColorBucket, LoudnessLevel};

fn color_at(db: f64) -> ColorBucket {
    ColorBucket::classify(LoudnessLevel::new(db))
}

/// WHAT: Every bucket boundary lands on the documented side
/// WHY: Boundaries are inclusive on the louder bucket's lower edge
#[test]
fn given_boundary_levels_when_classifying_then_lower_edge_is_inclusive() {
    // Given/When/Then: Exact boundary values
    assert_eq!(color_at(0.0), ColorBucket::Green);
    assert_eq!(color_at(-10.0), ColorBucket::Red);
    assert_eq!(color_at(-10.000_001), ColorBucket::Blue);
    assert_eq!(color_at(-30.0), ColorBucket::Blue);
    assert_eq!(color_at(-30.000_001), ColorBucket::Yellow);
    assert_eq!(color_at(-50.0), ColorBucket::Yellow);
    assert_eq!(color_at(-50.000_001), ColorBucket::Orange);
    assert_eq!(color_at(-70.0), ColorBucket::Orange);
    assert_eq!(color_at(-70.000_001), ColorBucket::Red);
}

/// WHAT: Representative interior values of each range
/// WHY: Guards against reordered or overlapping branches
#[test]
fn given_interior_levels_when_classifying_then_matching_bucket_returned() {
    assert_eq!(color_at(3.5), ColorBucket::Green);
    assert_eq!(color_at(-20.0), ColorBucket::Blue);
    assert_eq!(color_at(-40.0), ColorBucket::Yellow);
    assert_eq!(color_at(-60.0), ColorBucket::Orange);
    assert_eq!(color_at(-90.0), ColorBucket::Red);
    assert_eq!(color_at(-160.0), ColorBucket::Red);
}

/// WHAT: The band between the threshold and 0 falls through to red
/// WHY: No row covers [-10, 0); the final bucket must catch it
#[test]
fn given_level_between_threshold_and_zero_when_classifying_then_red() {
    // Given: Levels in [-10, 0)
    let levels = [-10.0, -5.0, -0.5, -f64::MIN_POSITIVE];

    // When/Then: All map to red
    for db in levels {
        assert_eq!(color_at(db), ColorBucket::Red, "level {db}");
    }
}

/// WHAT: Classification is total over a dense sweep, extremes included
/// WHY: Every level must map to exactly one of the five colors
#[test]
fn given_full_range_sweep_when_classifying_then_always_one_of_five_buckets() {
    // Given: A sweep from -200 to +20 dB in 0.25 dB steps plus extremes
    let sweep = (-800..=80).map(|i| f64::from(i) * 0.25);
    let extremes = [f64::NEG_INFINITY, f64::INFINITY, f64::MIN, f64::MAX];

    // When/Then: Every value lands in a known bucket
    for db in sweep.chain(extremes) {
        let color = color_at(db);
        assert!(ColorBucket::ALL.contains(&color), "level {db}");
    }
    assert_eq!(color_at(f64::NEG_INFINITY), ColorBucket::Red);
    assert_eq!(color_at(f64::INFINITY), ColorBucket::Green);
}

/// WHAT: NaN degrades to 0 and therefore to green
/// WHY: An invalid reading must not produce an undefined color
#[test]
fn given_nan_level_when_classifying_then_green() {
    assert_eq!(color_at(f64::NAN), ColorBucket::Green);
}

#[test]
fn given_bucket_when_displaying_then_lowercase_name() {
    assert_eq!(ColorBucket::Orange.to_string(), "orange");
    assert_eq!(ColorBucket::Red.rgb(), [0xFF, 0x00, 0x00]);
}
