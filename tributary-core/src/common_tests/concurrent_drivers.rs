//! Helpers pulling one shared iterator from several threads.

use std::sync::Barrier;
use std::thread;

use crate::pull::SyncPull;
use crate::stop::Stop;

/// Pulls `iterator` from `threads` threads until it stops.
///
/// All threads start pulling at the same time. Returns, per thread, the
/// elements it received in order, and the stop it observed.
///
pub fn pull_until_stop<S>(iterator: &S, threads: usize) -> Vec<(Vec<S::Item>, Stop)>
where
    S: SyncPull,
    S::Item: Send,
{
    let barrier = Barrier::new(threads);

    thread::scope(|scope| {
        let workers: Vec<_> = (0..threads)
            .map(|_| {
                let barrier = &barrier;
                scope.spawn(move || {
                    barrier.wait();

                    let mut received = Vec::new();
                    loop {
                        match iterator.pull() {
                            Ok(value) => received.push(value),
                            Err(stop) => return (received, stop),
                        }
                    }
                })
            })
            .collect();

        workers
            .into_iter()
            .map(|worker| worker.join().unwrap())
            .collect()
    })
}

/// Like [`pull_until_stop`], but flattens the elements of every thread into
/// one vector and checks that every thread saw the same stop.
///
pub fn collect_concurrently<S>(iterator: &S, threads: usize) -> (Vec<S::Item>, Stop)
where
    S: SyncPull,
    S::Item: Send,
{
    let per_thread = pull_until_stop(iterator, threads);

    let mut elements = Vec::new();
    let mut stops = Vec::with_capacity(threads);
    for (received, stop) in per_thread {
        elements.extend(received);
        stops.push(stop);
    }

    let first = stops[0].clone();
    for stop in &stops {
        assert_eq!(stop, &first, "threads observed different stops");
    }

    (elements, first)
}

/// Pulls exactly `pulls_per_thread` times from every thread, ignoring the
/// results. Used to put an iterator under contention.
///
pub fn hammer<S: SyncPull>(iterator: &S, threads: usize, pulls_per_thread: usize) {
    let barrier = Barrier::new(threads);

    thread::scope(|scope| {
        for _ in 0..threads {
            let barrier = &barrier;
            scope.spawn(move || {
                barrier.wait();
                for _ in 0..pulls_per_thread {
                    let _ = iterator.pull();
                }
            });
        }
    });
}
