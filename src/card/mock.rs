//! Scripted `UserApi` for card tests

use super::UserRecord;
use crate::api::{FetchError, UserApi};
use futures::future::BoxFuture;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// What a mocked lookup does
#[derive(Debug, Clone)]
pub enum MockOutcome {
    Respond(Result<UserRecord, FetchError>),
    /// Respond after a delay
    Delayed(Duration, Result<UserRecord, FetchError>),
    /// Never settle
    Pending,
}

impl MockOutcome {
    pub fn ok(record: UserRecord) -> Self {
        Self::Respond(Ok(record))
    }

    pub fn err(err: FetchError) -> Self {
        Self::Respond(Err(err))
    }
}

/// Mock lookup API that records every requested id
pub struct MockApi {
    default: MockOutcome,
    by_id: Mutex<HashMap<String, MockOutcome>>,
    calls: Mutex<Vec<String>>,
}

impl MockApi {
    pub fn new(default: MockOutcome) -> Arc<Self> {
        Arc::new(Self {
            default,
            by_id: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        })
    }

    /// Script the outcome for one id
    pub fn respond(&self, id: &str, outcome: MockOutcome) {
        self.by_id.lock().unwrap().insert(id.to_string(), outcome);
    }

    /// Ids requested so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl UserApi for MockApi {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn fetch_user(&self, id: &str) -> BoxFuture<'static, Result<UserRecord, FetchError>> {
        self.calls.lock().unwrap().push(id.to_string());
        let outcome = self
            .by_id
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .unwrap_or_else(|| self.default.clone());

        Box::pin(async move {
            match outcome {
                MockOutcome::Respond(result) => result,
                MockOutcome::Delayed(delay, result) => {
                    tokio::time::sleep(delay).await;
                    result
                }
                MockOutcome::Pending => futures::future::pending().await,
            }
        })
    }
}
