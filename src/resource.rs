//! Fetch-lifecycle state shared by every view.
//!
//! Each view in the monitor goes through the same three stages: it starts
//! loading, then either holds data or holds an error message. [`Resource`]
//! is that tagged union; [`Loader`] drives it by running a fetch on a
//! worker thread so the render loop never blocks on the network.
//!
//! Requests cannot be cancelled once started, so every request carries a
//! token. `poll` only applies the outcome whose token matches the most
//! recently issued request; anything older is a stale response and is
//! dropped on the floor. A loader that has been torn down simply stops
//! receiving, and the worker's send becomes a no-op.

use crate::error::Result;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;

/// Lifecycle state of one fetched value.
#[derive(Debug, Clone, PartialEq)]
pub enum Resource<T> {
    /// Request issued, response not yet applied.
    Loading,
    /// Fetch and decode succeeded.
    Ready(T),
    /// Fetch settled with an error; holds the user-visible message.
    Failed(String),
}

impl<T> Resource<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Resource::Loading)
    }

    /// The held value, if ready.
    pub fn ready(&self) -> Option<&T> {
        match self {
            Resource::Ready(value) => Some(value),
            _ => None,
        }
    }

    /// The error message, if failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            Resource::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Runs fetch jobs on worker threads and funnels outcomes back to the
/// owning view, discarding responses that a newer request has superseded.
pub struct Loader<T> {
    tx: Sender<(u64, std::result::Result<T, String>)>,
    rx: Receiver<(u64, std::result::Result<T, String>)>,
    /// Token of the most recently issued request.
    seq: u64,
}

impl<T: Send + 'static> Loader<T> {
    pub fn new() -> Self {
        let (tx, rx) = channel();
        Self { tx, rx, seq: 0 }
    }

    /// Issue a new request. Any outcome from a previously started job
    /// becomes stale the moment this returns.
    pub fn start<F>(&mut self, job: F)
    where
        F: FnOnce() -> Result<T> + Send + 'static,
    {
        self.seq += 1;
        let token = self.seq;
        let tx = self.tx.clone();
        thread::spawn(move || {
            let outcome = job().map_err(|e| e.to_string());
            // The loader may be gone by the time the job settles.
            let _ = tx.send((token, outcome));
        });
    }

    /// Drain settled outcomes, returning the current request's outcome if it
    /// has arrived. Stale outcomes are discarded.
    pub fn poll(&mut self) -> Option<std::result::Result<T, String>> {
        let mut current = None;
        while let Ok((token, outcome)) = self.rx.try_recv() {
            if token == self.seq {
                current = Some(outcome);
            }
        }
        current
    }
}

impl<T: Send + 'static> Default for Loader<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    /// Poll until an outcome arrives or the deadline passes.
    fn poll_until<T: Send + 'static>(
        loader: &mut Loader<T>,
    ) -> Option<std::result::Result<T, String>> {
        for _ in 0..200 {
            if let Some(outcome) = loader.poll() {
                return Some(outcome);
            }
            thread::sleep(Duration::from_millis(5));
        }
        None
    }

    #[test]
    fn test_resource_accessors() {
        let loading: Resource<i32> = Resource::Loading;
        assert!(loading.is_loading());
        assert_eq!(loading.ready(), None);
        assert_eq!(loading.error(), None);

        let ready = Resource::Ready(7);
        assert_eq!(ready.ready(), Some(&7));

        let failed: Resource<i32> = Resource::Failed("boom".to_string());
        assert_eq!(failed.error(), Some("boom"));
    }

    #[test]
    fn test_loader_delivers_success() {
        let mut loader: Loader<i32> = Loader::new();
        loader.start(|| Ok(42));
        assert_eq!(poll_until(&mut loader), Some(Ok(42)));
    }

    #[test]
    fn test_loader_maps_error_to_message() {
        let mut loader: Loader<i32> = Loader::new();
        loader.start(|| Err(crate::error::RunwatchError::Status(500)));
        let outcome = poll_until(&mut loader).unwrap();
        assert!(outcome.unwrap_err().contains("500"));
    }

    #[test]
    fn test_poll_discards_stale_token() {
        let mut loader: Loader<i32> = Loader::new();
        loader.start(|| Ok(2));
        assert!(poll_until(&mut loader).is_some());

        // Inject an outcome for a superseded request directly.
        loader.seq = 5;
        loader.tx.send((4, Ok(999))).unwrap();
        assert_eq!(loader.poll(), None);
    }

    #[test]
    fn test_newer_request_wins_over_slow_older_one() {
        let mut loader: Loader<i32> = Loader::new();
        loader.start(|| {
            thread::sleep(Duration::from_millis(100));
            Ok(1)
        });
        loader.start(|| Ok(2));

        assert_eq!(poll_until(&mut loader), Some(Ok(2)));

        // Give the slow job time to settle; its late response must not
        // surface.
        thread::sleep(Duration::from_millis(150));
        assert_eq!(loader.poll(), None);
    }

    #[test]
    fn test_dropped_loader_does_not_panic_worker() {
        let mut loader: Loader<i32> = Loader::new();
        loader.start(|| {
            thread::sleep(Duration::from_millis(50));
            Ok(1)
        });
        drop(loader);
        // The worker's send fails silently; nothing to assert beyond "no
        // panic", which a failed send would not cause anyway.
        thread::sleep(Duration::from_millis(100));
    }
}
