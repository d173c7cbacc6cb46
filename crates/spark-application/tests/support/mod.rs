#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use spark_core::error::Result;
use spark_core::generation::{GenerationRequest, GenerationResponse, TextGenerator};

/// Generator that replays canned results after an optional delay and records
/// every request it receives.
pub struct ScriptedGenerator {
    replies: Mutex<VecDeque<Result<GenerationResponse>>>,
    requests: Mutex<Vec<GenerationRequest>>,
    delay: Duration,
}

impl ScriptedGenerator {
    pub fn new(replies: Vec<Result<GenerationResponse>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
            delay: Duration::ZERO,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse> {
        self.requests.lock().unwrap().push(request);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(GenerationResponse::default()))
    }
}
