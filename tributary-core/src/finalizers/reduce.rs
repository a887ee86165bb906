use crate::pull::Pull;
use crate::stop::{Failure, Stop};

/// Folds every element into an accumulator, starting from `init`.
///
/// `combine` receives the element first and the accumulator second. Running
/// out of elements returns the accumulator; a failure discards it.
///
pub fn reduce<I, K, F>(mut iterator: I, init: K, mut combine: F) -> Result<K, Failure>
where
    I: Pull,
    F: FnMut(I::Item, K) -> K,
{
    let mut accumulator = init;
    loop {
        match iterator.pull() {
            Ok(value) => accumulator = combine(value, accumulator),
            Err(Stop::Exhausted) => return Ok(accumulator),
            Err(Stop::Failed(failure)) => return Err(failure),
        }
    }
}

/// Collects every element into a vector.
///
pub fn collect<I: Pull>(iterator: I) -> Result<Vec<I::Item>, Failure> {
    reduce(iterator, Vec::new(), |value, mut elements| {
        elements.push(value);
        elements
    })
}

pub fn count<I: Pull>(iterator: I) -> Result<usize, Failure> {
    reduce(iterator, 0, |_, total| total + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipelines::{limit, map};
    use crate::sources::{empty, from_sequence, sequence};

    #[test]
    fn test_reduce_argument_order() {
        let joined = reduce(from_sequence(vec!["a", "b", "c"]), String::new(), |value, text| {
            text + value
        });

        assert_eq!(joined, Ok("abc".to_string()));
    }

    #[test]
    fn test_reduce_discards_on_failure() {
        let failure = Failure::msg("fourth");
        let reported = failure.clone();
        let mapped = map(sequence(1, 1), move |value| {
            if value == 4 {
                Err(Stop::Failed(failure.clone()))
            } else {
                Ok(value)
            }
        });

        assert_eq!(reduce(mapped, 0, |value, total| total + value), Err(reported));
    }

    #[test]
    fn test_collect_and_count() {
        assert_eq!(collect(limit(sequence(3, -1), 4)), Ok(vec![3, 2, 1, 0]));
        assert_eq!(count(limit(sequence(0, 1), 7)), Ok(7));
        assert_eq!(collect(empty::<u8>()), Ok(vec![]));
    }
}
