use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::broadcast;

use super::{Cached, GatewayError};

type Outcome = Result<Cached, GatewayError>;

/// Shares one in-flight lookup among concurrent callers on the same key
#[derive(Clone, Default)]
pub(crate) struct Coalescer {
    // Map key -> broadcast channel carrying the leader's outcome
    inflight: Arc<DashMap<String, broadcast::Sender<Outcome>>>,
}

impl Coalescer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Execute a request with coalescing for the given key.
    /// If a request for this key is already running, wait for its result.
    /// Otherwise, run the request and broadcast the result.
    ///
    /// A waiter whose leader is dropped before finishing takes over and runs
    /// `f` itself.
    pub(crate) async fn do_request<F, Fut>(&self, key: &str, f: F) -> Outcome
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Outcome>,
    {
        loop {
            // Scope drops the DashMap entry lock before awaiting
            let action = {
                match self.inflight.entry(key.to_string()) {
                    Entry::Occupied(o) => Ok(o.get().subscribe()),
                    Entry::Vacant(v) => {
                        let (tx, _rx) = broadcast::channel(1);
                        v.insert(tx.clone());
                        Err(tx)
                    }
                }
            };

            match action {
                Ok(mut rx) => match rx.recv().await {
                    Ok(outcome) => return outcome,
                    // Leader was dropped without sending
                    Err(_) => continue,
                },
                Err(tx) => {
                    let guard = InflightGuard {
                        inflight: &self.inflight,
                        key,
                        tx: &tx,
                    };
                    let outcome = f().await;
                    drop(guard);

                    if tx.receiver_count() > 0 {
                        let _ = tx.send(outcome.clone());
                    }

                    return outcome;
                }
            }
        }
    }

    /// Number of keys with a request in flight
    pub(crate) fn in_flight(&self) -> usize {
        self.inflight.len()
    }
}

/// Removes the leader's in-flight entry when the leader finishes or is dropped
struct InflightGuard<'a> {
    inflight: &'a DashMap<String, broadcast::Sender<Outcome>>,
    key: &'a str,
    tx: &'a broadcast::Sender<Outcome>,
}

impl Drop for InflightGuard<'_> {
    fn drop(&mut self) {
        self.inflight
            .remove_if(self.key, |_, sender| sender.same_channel(self.tx));
    }
}
