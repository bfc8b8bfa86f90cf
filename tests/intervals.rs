use rail_charts::intervals::{Bucket, distributed_intervals_from_values, value_to_interval};

#[test]
fn bounds_are_ordered_and_bracket_the_dataset() {
    let datasets: Vec<Vec<f64>> = vec![
        vec![5.0],
        vec![7.0, 3.0],
        vec![12.0, 4.0, 8.0],
        vec![600.0, 1200.0, 300.0, 900.0, 450.0, 2400.0, 1500.0],
        vec![3.5, 3.5, 3.5, 1.0, 9.0, 9.0, 2.0, 4.0],
    ];
    for values in datasets {
        let bounds = distributed_intervals_from_values(&values).expect("non-empty dataset");
        for pair in bounds.0.windows(2) {
            assert!(pair[0] <= pair[1], "bounds {:?} for {:?}", bounds, values);
        }
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(bounds.min(), min);
        assert_eq!(bounds.max(), max);
    }
}

#[test]
fn durations_classify_into_thirds() {
    // running times in seconds of nine trains
    let durations = [3_600.0, 3_720.0, 3_900.0, 4_100.0, 4_200.0, 4_300.0, 5_000.0, 5_400.0, 6_000.0];
    let bounds = distributed_intervals_from_values(&durations).unwrap();
    assert_eq!(bounds.0, [3_600.0, 4_100.0, 5_000.0, 6_000.0]);

    assert_eq!(value_to_interval(Some(3_720.0), Some(&bounds)), Some(Bucket::Low));
    assert_eq!(value_to_interval(Some(4_100.0), Some(&bounds)), Some(Bucket::Medium));
    assert_eq!(value_to_interval(Some(4_999.0), Some(&bounds)), Some(Bucket::Medium));
    assert_eq!(value_to_interval(Some(5_000.0), Some(&bounds)), Some(Bucket::High));
    assert_eq!(value_to_interval(None, Some(&bounds)), None);
    assert_eq!(Bucket::High.index(), 2);
}
