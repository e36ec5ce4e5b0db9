//! Interval polling feeds.
//!
//! A poller re-runs a fetch on a fixed period and publishes every successful
//! result into a `watch` channel. Callers only see the [`Feed`] side, so a
//! push source can later replace the timer without touching them.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use tokio::{sync::watch, task::JoinHandle, time::MissedTickBehavior};
use tokio_stream::{wrappers::WatchStream, Stream, StreamExt};

use crate::error::ClientResult;

/// Observable source of the latest value of something server-side
pub trait Feed: Send + Sync {
    type Item: Clone + Send + Sync + 'static;

    /// Receiver positioned on the current value (`None` until the first result)
    fn subscribe(&self) -> watch::Receiver<Option<Self::Item>>;

    fn latest(&self) -> Option<Self::Item> {
        self.subscribe().borrow().clone()
    }

    /// Every published value, starting with the current one if any
    fn stream(&self) -> Pin<Box<dyn Stream<Item = Self::Item> + Send>> {
        Box::pin(WatchStream::new(self.subscribe()).filter_map(|value| value))
    }
}

/// Feed backed by a poller's channel
#[derive(Clone)]
pub struct PollFeed<T> {
    rx: watch::Receiver<Option<T>>,
}

impl<T: Clone + Send + Sync + 'static> Feed for PollFeed<T> {
    type Item = T;

    fn subscribe(&self) -> watch::Receiver<Option<T>> {
        self.rx.clone()
    }
}

/// Owns a running poll task; the task is aborted when the handle is stopped or dropped
#[derive(Debug)]
pub struct PollHandle {
    name: &'static str,
    task: JoinHandle<()>,
}

impl PollHandle {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    pub fn stop(self) {
        drop(self);
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.task.abort();
        tracing::debug!("Stopped {} poller", self.name);
    }
}

pub struct Poller;

impl Poller {
    /// Run `fetch` now and then every `period`.
    ///
    /// Failed polls are logged and the previous value stays published.
    pub fn spawn<T, F, Fut>(name: &'static str, period: Duration, mut fetch: F) -> (PollHandle, PollFeed<T>)
    where
        T: Clone + Send + Sync + 'static,
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ClientResult<T>> + Send + 'static,
    {
        let (tx, rx) = watch::channel(None);

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if tx.is_closed() {
                    tracing::debug!("No subscribers left for {} poller", name);
                    break;
                }
                match fetch().await {
                    Ok(value) => {
                        tx.send_replace(Some(value));
                    }
                    Err(e) => tracing::warn!("Polling {} failed: {}", name, e),
                }
            }
        });

        tracing::debug!("Started {} poller every {:?}", name, period);
        (PollHandle { name, task }, PollFeed { rx })
    }
}
