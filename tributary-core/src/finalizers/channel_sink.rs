use std::thread;

use crossbeam::channel::{self, Receiver, Sender, select};
use tracing::debug;

use crate::cancellation::CancellationToken;
use crate::error::{Error, Result};
use crate::pull::Pull;
use crate::stop::Stop;

const DEFAULT_THREAD_NAME: &str = "tributary-producer";

/// Settings of the channel created by [`to_channel_with`].
///
/// The default is a zero-capacity channel, where every send waits for a
/// matching receive, and a producer thread named `tributary-producer`.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelOptions {
    capacity: usize,
    thread_name: String,
}

impl Default for ChannelOptions {
    fn default() -> Self {
        ChannelOptions {
            capacity: 0,
            thread_name: DEFAULT_THREAD_NAME.to_string(),
        }
    }
}

impl ChannelOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = name.into();
        self
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn thread_name(&self) -> &str {
        &self.thread_name
    }
}

/// Why a producer thread returned.
///
enum ProducerExit {
    Upstream(Stop),
    Cancelled,
    Disconnected,
}

/// Drains `iterator` into a fresh channel from a background thread.
///
/// Uses [`ChannelOptions::default`]; see [`to_channel_with`].
///
pub fn to_channel<I>(token: &CancellationToken, iterator: I) -> Result<Receiver<I::Item>>
where
    I: Pull + Send + 'static,
    I::Item: Send + 'static,
{
    to_channel_with(token, iterator, ChannelOptions::default())
}

/// Drains `iterator` into a fresh channel from a background thread.
///
/// The producer thread pulls and sends until the iterator stops, the token is
/// cancelled or the receiver is dropped. On every one of those paths the
/// sender is dropped, so the receiver sees the channel disconnect after the
/// last delivered element. Elements not yet pulled are abandoned, and a
/// failure of the iterator is not reported through the channel.
///
/// A send blocked on a full channel is woken up by cancellation.
///
pub fn to_channel_with<I>(
    token: &CancellationToken,
    iterator: I,
    options: ChannelOptions,
) -> Result<Receiver<I::Item>>
where
    I: Pull + Send + 'static,
    I::Item: Send + 'static,
{
    let (sender, receiver) = channel::bounded(options.capacity);
    let token = token.clone();
    let ChannelOptions {
        capacity,
        thread_name,
    } = options;

    thread::Builder::new()
        .name(thread_name.clone())
        .spawn(move || {
            debug!(capacity, "producer started");
            match produce(iterator, sender, &token) {
                ProducerExit::Upstream(stop) => debug!(%stop, "producer stopped: upstream"),
                ProducerExit::Cancelled => debug!("producer stopped: cancelled"),
                ProducerExit::Disconnected => debug!("producer stopped: receiver dropped"),
            }
        })
        .map_err(|source| Error::Spawn {
            name: thread_name,
            source,
        })?;

    Ok(receiver)
}

fn produce<I: Pull>(
    mut iterator: I,
    sender: Sender<I::Item>,
    token: &CancellationToken,
) -> ProducerExit {
    loop {
        if token.is_cancelled() {
            return ProducerExit::Cancelled;
        }

        let value = match iterator.pull() {
            Ok(value) => value,
            Err(stop) => return ProducerExit::Upstream(stop),
        };

        let exit = select! {
            send(sender, value) -> sent => sent.err().map(|_| ProducerExit::Disconnected),
            recv(token.signal()) -> _signal => Some(ProducerExit::Cancelled),
        };

        if let Some(exit) = exit {
            return exit;
        }
    }
}
