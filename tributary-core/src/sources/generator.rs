use crate::pull::{Pull, SyncPull};
use crate::stop::Stop;

// ============================================================================
// Generator
// ============================================================================

/// Infinite iterator returning the result of a producer function per pull.
///
/// The iterator adds no synchronization around the function. It is
/// concurrent-safe when the function is `Fn + Sync`; whether concurrent calls
/// produce sensible values is up to the function. Use [`generator_safe`] to
/// get that flavour from a closure written inline.
///
#[derive(Clone)]
pub struct Generator<F> {
    produce: F,
}

pub fn generator<T, F>(produce: F) -> Generator<F>
where
    F: FnMut() -> T,
{
    Generator { produce }
}

/// Like [`generator`], but takes an `Fn + Sync` function so the iterator is a
/// [`SyncPull`].
///
pub fn generator_safe<T, F>(produce: F) -> Generator<F>
where
    F: Fn() -> T + Send + Sync,
{
    Generator { produce }
}

impl<T, F> Pull for Generator<F>
where
    F: FnMut() -> T,
{
    type Item = T;

    #[inline]
    fn pull(&mut self) -> Result<T, Stop> {
        Ok((self.produce)())
    }
}

impl<T, F> SyncPull for Generator<F>
where
    F: Fn() -> T + Send + Sync,
{
    type Item = T;

    #[inline]
    fn pull(&self) -> Result<T, Stop> {
        Ok((self.produce)())
    }
}

// ============================================================================
// Generate - seeded unfold
// ============================================================================

/// Iterator that derives every element from the previous one.
///
/// The first pull calls the step function with the seed. The step function
/// may stop the iterator; the stop is kept and returned by every later pull.
///
pub struct Generate<T, F> {
    previous: T,
    step: F,
    stopped: Option<Stop>,
}

pub fn generate<T, F>(seed: T, step: F) -> Generate<T, F>
where
    T: Clone,
    F: FnMut(&T) -> Result<T, Stop>,
{
    Generate {
        previous: seed,
        step,
        stopped: None,
    }
}

impl<T, F> Pull for Generate<T, F>
where
    T: Clone,
    F: FnMut(&T) -> Result<T, Stop>,
{
    type Item = T;

    fn pull(&mut self) -> Result<T, Stop> {
        if let Some(stop) = &self.stopped {
            return Err(stop.clone());
        }

        match (self.step)(&self.previous) {
            Ok(value) => {
                self.previous = value.clone();
                Ok(value)
            }
            Err(stop) => {
                self.stopped = Some(stop.clone());
                Err(stop)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stop::Failure;

    #[test]
    fn test_generator_with_state() {
        let mut value = 1;
        let mut powers = generator(move || {
            value *= 2;
            value
        });

        assert_eq!(powers.pull(), Ok(2));
        assert_eq!(powers.pull(), Ok(4));
        assert_eq!(powers.pull(), Ok(8));
    }

    #[test]
    fn test_generator_shared() {
        let zeros = generator_safe(|| 0u8);

        assert_eq!(SyncPull::pull(&zeros), Ok(0));
        assert_eq!(SyncPull::pull(&zeros), Ok(0));
    }

    #[test]
    fn test_generate_from_seed() {
        let mut fibonacci = generate((0u64, 1u64), |&(a, b)| Ok((b, a + b)));

        let firsts: Vec<u64> = (0..5).map(|_| fibonacci.pull().unwrap().0).collect();
        assert_eq!(firsts, vec![1, 1, 2, 3, 5]);
    }

    #[test]
    fn test_generate_latches_stop() {
        let failure = Failure::msg("too large");
        let stop = Stop::Failed(failure.clone());
        let mut doubling = generate(1, move |&value| {
            if value >= 4 {
                Err(stop.clone())
            } else {
                Ok(value * 2)
            }
        });

        assert_eq!(doubling.pull(), Ok(2));
        assert_eq!(doubling.pull(), Ok(4));
        assert_eq!(doubling.pull(), Err(Stop::Failed(failure.clone())));
        assert_eq!(doubling.pull(), Err(Stop::Failed(failure)));
    }
}
