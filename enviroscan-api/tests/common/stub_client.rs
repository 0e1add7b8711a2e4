use std::cell::RefCell;
use std::rc::Rc;

use enviroscan_api::{TransportClient, TransportError};

#[derive(Debug, Default)]
pub struct StubLog {
    pub subscriptions: Vec<Vec<String>>,
    pub close_calls: usize,
}

/// In-memory transport that records requests. The log is shared so tests can
/// inspect it after the client has been moved into a dashboard.
#[derive(Debug, Clone, Default)]
pub struct StubClient {
    pub log: Rc<RefCell<StubLog>>,
    pub fail_subscribe: bool,
}

impl StubClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_subscribe() -> Self {
        Self {
            fail_subscribe: true,
            ..Self::default()
        }
    }
}

impl TransportClient for StubClient {
    fn subscribe(&mut self, topics: &[&str]) -> Result<(), TransportError> {
        if self.fail_subscribe {
            return Err(TransportError::Subscribe("not authorized".into()));
        }

        self.log
            .borrow_mut()
            .subscriptions
            .push(topics.iter().map(|topic| topic.to_string()).collect());
        Ok(())
    }

    fn close(&mut self) -> Result<(), TransportError> {
        self.log.borrow_mut().close_calls += 1;
        Ok(())
    }
}
