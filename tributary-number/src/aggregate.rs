use std::ops::{Add, Mul};

use num_traits::{One, ToPrimitive, Zero};
use tributary_core::finalizers;
use tributary_core::{Failure, Pull, PullExt, Stop};

use crate::error::{NumberError, Result};

/// Sum of all elements; zero for an empty input.
///
pub fn sum<I>(iterator: I) -> Result<I::Item>
where
    I: Pull,
    I::Item: Zero + Add<Output = I::Item>,
{
    Ok(finalizers::reduce(iterator, I::Item::zero(), |value, total| total + value)?)
}

/// Product of all elements; one for an empty input.
///
pub fn prod<I>(iterator: I) -> Result<I::Item>
where
    I: Pull,
    I::Item: One + Mul<Output = I::Item>,
{
    Ok(finalizers::reduce(iterator, I::Item::one(), |value, total| total * value)?)
}

/// Arithmetic mean, computed in `f64`.
///
pub fn average<I>(iterator: I) -> Result<f64>
where
    I: Pull,
    I::Item: ToPrimitive,
{
    let (count, total) = as_f64(iterator).reduce((0usize, 0.0), |value, (count, total)| {
        (count + 1, total + value)
    })
    .map_err(unwrap_conversion)?;

    if count == 0 {
        return Err(NumberError::EmptyIterator);
    }

    Ok(total / count as f64)
}

/// Middle element of the sorted input, or the mean of the two middle elements
/// for an even count.
///
/// Buffers the whole input. Values are ordered with [`f64::total_cmp`].
///
pub fn median<I>(iterator: I) -> Result<f64>
where
    I: Pull,
    I::Item: ToPrimitive,
{
    let mut values = as_f64(iterator).collect().map_err(unwrap_conversion)?;
    values.sort_unstable_by(f64::total_cmp);

    let middle = values.len() / 2;
    match values.len() {
        0 => Err(NumberError::EmptyIterator),
        len if len % 2 == 0 => Ok((values[middle - 1] + values[middle]) / 2.0),
        _ => Ok(values[middle]),
    }
}

/// Converts elements to `f64`, failing the iteration on the first one that
/// does not convert.
///
fn as_f64<I>(iterator: I) -> impl Pull<Item = f64>
where
    I: Pull,
    I::Item: ToPrimitive,
{
    iterator.map(|value: I::Item| {
        value
            .to_f64()
            .ok_or_else(|| Stop::failed(NumberError::NotRepresentable))
    })
}

/// Recovers the conversion error raised by [`as_f64`] from the failure that
/// carried it through the pipeline.
///
fn unwrap_conversion(failure: Failure) -> NumberError {
    match failure.downcast_ref::<NumberError>() {
        Some(NumberError::NotRepresentable) => NumberError::NotRepresentable,
        _ => NumberError::Pipeline(failure),
    }
}

#[cfg(test)]
mod tests {
    use tributary_core::sources::from_sequence;

    use super::*;

    #[test]
    fn test_sum_and_prod() {
        assert_eq!(sum(from_sequence(vec![1, 2, 3, 4])).unwrap(), 10);
        assert_eq!(prod(from_sequence(vec![1, 2, 3, 4])).unwrap(), 24);
        assert_eq!(sum(from_sequence(vec![0.5, 0.25])).unwrap(), 0.75);
    }

    #[test]
    fn test_median_sorts() {
        assert_eq!(median(from_sequence(vec![9, 1, 5])).unwrap(), 5.0);
        assert_eq!(median(from_sequence(vec![4.0, 1.0, 3.0, 2.0])).unwrap(), 2.5);
    }
}
