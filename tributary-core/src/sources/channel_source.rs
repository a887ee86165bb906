use std::sync::atomic::{AtomicBool, Ordering};

use crossbeam::channel::{Receiver, select};

use crate::cancellation::CancellationToken;
use crate::pull::{Pull, SyncPull};
use crate::stop::Stop;

/// Iterator over the values received from a crossbeam channel.
///
/// A pull blocks until a value arrives, the channel disconnects or the token
/// is cancelled. Disconnection and cancellation both end the iterator with
/// [`Stop::Exhausted`]; the caller cannot tell them apart.
///
/// Once stopped, the iterator stays stopped even if the channel still holds
/// buffered values.
///
pub struct ChannelSource<T> {
    receiver: Receiver<T>,
    token: CancellationToken,
    stopped: AtomicBool,
}

pub fn from_channel<T>(token: &CancellationToken, receiver: Receiver<T>) -> ChannelSource<T> {
    ChannelSource {
        receiver,
        token: token.clone(),
        stopped: AtomicBool::new(false),
    }
}

impl<T> ChannelSource<T> {
    #[inline]
    fn stop(&self) -> Result<T, Stop> {
        self.stopped.store(true, Ordering::Release);
        Err(Stop::Exhausted)
    }
}

impl<T: Send> SyncPull for ChannelSource<T> {
    type Item = T;

    fn pull(&self) -> Result<T, Stop> {
        if self.stopped.load(Ordering::Acquire) || self.token.is_cancelled() {
            return self.stop();
        }

        select! {
            recv(self.receiver) -> message => match message {
                Ok(value) => Ok(value),
                Err(_) => self.stop(),
            },
            recv(self.token.signal()) -> _signal => self.stop(),
        }
    }
}

impl<T: Send> Pull for ChannelSource<T> {
    type Item = T;

    #[inline]
    fn pull(&mut self) -> Result<T, Stop> {
        SyncPull::pull(&*self)
    }
}
