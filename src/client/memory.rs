use super::{ApiRequest, RawResponse, Transport};
use crate::error::ClientError;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Scripted transport: answers queued responses in order and records every
/// request it was asked to send.
#[derive(Debug, Clone, Default)]
pub struct MemoryTransport {
    inner: Rc<RefCell<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    responses: VecDeque<Result<RawResponse, ClientError>>,
    requests: Vec<ApiRequest>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, status: u16, body: &str) {
        self.inner.borrow_mut().responses.push_back(Ok(RawResponse {
            status,
            body: body.to_string(),
        }));
    }

    pub fn fail(&self, error: ClientError) {
        self.inner.borrow_mut().responses.push_back(Err(error));
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.inner.borrow().requests.clone()
    }
}

impl Transport for MemoryTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, ClientError> {
        let mut inner = self.inner.borrow_mut();
        inner.requests.push(request);
        inner
            .responses
            .pop_front()
            .unwrap_or_else(|| Err(ClientError::Transport("no scripted response".into())))
    }
}
