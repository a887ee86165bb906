use std::time::{Duration, Instant};
use std::thread;

use crossbeam::channel;
use rstest::rstest;
use tributary_core::common_tests::sync_pull_core_tests::*;
use tributary_core::prelude::*;
use tributary_core::sources::{ChannelSource, SliceSourceSafe};

// Trait for type-level parametrization over the sources built from a vector
trait TestSource {
    type Source: SyncPull<Item = u64>;

    fn build(values: Vec<u64>) -> Self::Source;
}

struct UseSliceSourceSafe;
struct UseChannelSource;

impl TestSource for UseSliceSourceSafe {
    type Source = SliceSourceSafe<u64>;

    fn build(values: Vec<u64>) -> Self::Source {
        from_sequence_safe(values)
    }
}

impl TestSource for UseChannelSource {
    type Source = ChannelSource<u64>;

    fn build(values: Vec<u64>) -> Self::Source {
        let (sender, receiver) = channel::unbounded();
        for value in values {
            sender.send(value).unwrap();
        }
        from_channel(&CancellationToken::new(), receiver)
    }
}

#[rstest]
#[case::slice_source_safe(UseSliceSourceSafe)]
#[case::channel_source(UseChannelSource)]
fn source_in_order<T: TestSource>(#[case] _type: T) {
    test_in_order(T::build, 100);
}

#[rstest]
#[case::slice_source_safe(UseSliceSourceSafe)]
#[case::channel_source(UseChannelSource)]
fn source_empty<T: TestSource>(#[case] _type: T) {
    test_empty(T::build);
}

#[rstest]
#[case::empty(vec![])]
#[case::single(vec!["only"])]
#[case::several(vec!["a", "b", "c", "d"])]
fn from_sequence_yields_all(#[case] words: Vec<&'static str>) {
    let (elements, stop) = test_stop_is_monotonic(from_sequence(words.clone()));

    assert_eq!(elements, words);
    assert_eq!(stop, Stop::Exhausted);
}

#[rstest]
#[case::counting_up(0, 1, vec![0, 1, 2, 3])]
#[case::counting_down(5, -2, vec![5, 3, 1, -1])]
#[case::constant(7, 0, vec![7, 7, 7, 7])]
#[case::wraps_at_max(i64::MAX - 1, 1, vec![i64::MAX - 1, i64::MAX, i64::MIN, i64::MIN + 1])]
#[case::wraps_at_min(i64::MIN, -1, vec![i64::MIN, i64::MAX, i64::MAX - 1, i64::MAX - 2])]
fn sequence_progression(#[case] start: i64, #[case] step: i64, #[case] expected: Vec<i64>) {
    let sequential = sequence(start, step).limit(4).collect().unwrap();
    let safe = sequence_safe(start, step).limit(4).collect().unwrap();

    assert_eq!(sequential, expected);
    assert_eq!(safe, expected);
}

#[test]
fn generator_calls_function_per_pull() {
    let mut calls = 0;
    let powers = generator(|| {
        calls += 1;
        1u32 << calls
    })
    .limit(5)
    .collect()
    .unwrap();

    assert_eq!(powers, vec![2, 4, 8, 16, 32]);
    assert_eq!(calls, 5);
}

#[test]
fn generate_unfolds_from_seed() {
    let collatz = generate(6u64, |&previous| match previous {
        1 => Err(Stop::Exhausted),
        even if even % 2 == 0 => Ok(even / 2),
        odd => Ok(3 * odd + 1),
    });

    assert_eq!(collatz.collect(), Ok(vec![3, 10, 5, 16, 8, 4, 2, 1]));
}

#[test]
fn repeat_and_cycle() {
    assert_eq!(repeat('x').limit(3).collect(), Ok(vec!['x', 'x', 'x']));
    assert_eq!(cycle(vec![1, 2, 3]).limit(7).collect(), Ok(vec![1, 2, 3, 1, 2, 3, 1]));
    assert_eq!(cycle_safe(vec![1, 2]).limit(5).collect(), Ok(vec![1, 2, 1, 2, 1]));
    assert_eq!(cycle(Vec::<u8>::new()).collect(), Ok(vec![]));
    assert_eq!(cycle_safe(Vec::<u8>::new()).collect(), Ok(vec![]));
}

#[test]
fn empty_source() {
    let (elements, stop) = test_stop_is_monotonic(empty::<String>());

    assert!(elements.is_empty());
    assert_eq!(stop, Stop::Exhausted);
}

#[test]
fn channel_source_drops_buffered_values_after_cancel() {
    let token = CancellationToken::new();
    let (sender, receiver) = channel::unbounded();
    let source = from_channel(&token, receiver);

    sender.send(1).unwrap();
    assert_eq!(source.pull(), Ok(1));

    sender.send(2).unwrap();
    token.cancel();

    let (elements, stop) = test_stop_is_monotonic(&source);
    assert!(elements.is_empty());
    assert_eq!(stop, Stop::Exhausted);
}

#[test]
fn channel_source_unblocks_all_pullers_on_cancel() {
    let token = CancellationToken::new();
    let source = from_channel(&token, channel::never::<u64>());

    let start = Instant::now();
    thread::scope(|scope| {
        let pullers: Vec<_> = (0..4).map(|_| scope.spawn(|| source.pull())).collect();

        thread::sleep(Duration::from_millis(50));
        token.cancel();

        for puller in pullers {
            assert_eq!(puller.join().unwrap(), Err(Stop::Exhausted));
        }
    });

    assert!(start.elapsed() < Duration::from_secs(5));
}

#[test]
fn child_token_stops_channel_source() {
    let parent = CancellationToken::new();
    let source = from_channel(&parent.child_token(), channel::never::<u64>());

    parent.cancel();
    assert_eq!(source.pull(), Err(Stop::Exhausted));
}
