use rand::Rng;
use rand::seq::SliceRandom;
use rstest::rstest;
use tributary_core::prelude::*;
use tributary_number::{NumberError, average, median, prod, sum};

#[rstest]
#[case::empty(vec![], 0, 1)]
#[case::single(vec![7], 7, 7)]
#[case::several(vec![2, 3, 4], 9, 24)]
#[case::negative(vec![-1, 5, -2], 2, 10)]
fn sum_and_prod(#[case] values: Vec<i64>, #[case] total: i64, #[case] product: i64) {
    assert_eq!(sum(from_sequence(values.clone())).unwrap(), total);
    assert_eq!(prod(from_sequence(values)).unwrap(), product);
}

#[rstest]
#[case::single(vec![4.0], 4.0)]
#[case::odd(vec![3.0, 1.0, 2.0], 2.0)]
#[case::even(vec![10.0, 1.0, 4.0, 2.0], 3.0)]
#[case::duplicates(vec![5.0, 5.0, 1.0, 5.0], 5.0)]
fn median_of(#[case] values: Vec<f64>, #[case] expected: f64) {
    assert_eq!(median(from_sequence(values)).unwrap(), expected);
}

#[test]
fn average_of_integers() {
    assert_eq!(average(from_sequence(vec![1u8, 2, 3, 4])).unwrap(), 2.5);
    assert_eq!(average(sequence(1, 1).limit(100)).unwrap(), 50.5);
}

#[test]
fn empty_input_has_no_average_or_median() {
    assert!(matches!(average(empty::<f64>()), Err(NumberError::EmptyIterator)));
    assert!(matches!(median(empty::<i32>()), Err(NumberError::EmptyIterator)));
}

#[test]
fn pipeline_failure_is_reported() {
    let failing = sequence(0, 1).map(|value| {
        if value < 3 { Ok(value) } else { Err(Stop::failed(std::fmt::Error)) }
    });

    match sum(failing) {
        Err(NumberError::Pipeline(failure)) => {
            assert!(failure.downcast_ref::<std::fmt::Error>().is_some())
        }
        other => panic!("unexpected result {other:?}"),
    }
}

#[test]
fn median_of_shuffled_range() {
    let mut rng = rand::thread_rng();
    let len = rng.gen_range(1..2_000usize);
    let mut values: Vec<u32> = (0..len as u32).collect();
    values.shuffle(&mut rng);

    let expected = (len as f64 - 1.0) / 2.0;
    assert_eq!(median(from_sequence(values.clone())).unwrap(), expected);
    assert_eq!(average(from_sequence(values)).unwrap(), expected);
}

#[test]
fn aggregates_over_shared_source() {
    let source = from_sequence_safe((1..=10).collect::<Vec<u64>>());

    let first_half = sum((&source).limit(5)).unwrap();
    let second_half = sum(&source).unwrap();

    assert_eq!(first_half, 15);
    assert_eq!(second_half, 40);
}
