use futures::future::{AbortHandle, Abortable};
use std::future::Future;

/// Keeps the abort handle of a page's in-flight list request. Starting a new
/// request or dropping the page aborts the previous one.
#[derive(Debug, Default)]
pub struct InFlight {
    handle: Option<AbortHandle>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn track<F: Future>(&mut self, future: F) -> Abortable<F> {
        self.abort();
        let (handle, registration) = AbortHandle::new_pair();
        self.handle = Some(handle);
        Abortable::new(future, registration)
    }

    pub fn abort(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use futures::future::{pending, ready, Aborted};

    #[test]
    fn newer_request_aborts_older_one() {
        let mut in_flight = InFlight::new();
        let stale = in_flight.track(pending::<u32>());
        let fresh = in_flight.track(ready(7));
        assert_eq!(block_on(stale), Err(Aborted));
        assert_eq!(block_on(fresh), Ok(7));
    }

    #[test]
    fn drop_aborts_outstanding_request() {
        let mut in_flight = InFlight::new();
        let request = in_flight.track(pending::<()>());
        drop(in_flight);
        assert_eq!(block_on(request), Err(Aborted));
    }
}
