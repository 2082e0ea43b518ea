//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::core::chat::{ChatSession, ChatSettings};
use crate::inference::{Completion, CompletionProvider, CompletionRequest, ProviderError};

/// A provider that replays queued outcomes and records every request.
/// Falls back to an "ok" reply once the queue is empty.
#[derive(Default)]
pub struct ScriptedProvider {
    outcomes: Mutex<VecDeque<Result<Completion, ProviderError>>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_reply(&self, text: &str) {
        self.push(Ok(Completion {
            text: text.to_string(),
            citations: Vec::new(),
        }));
    }

    pub fn push(&self, outcome: Result<Completion, ProviderError>) {
        self.outcomes.lock().unwrap().push_back(outcome);
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, request: CompletionRequest) -> Result<Completion, ProviderError> {
        self.requests.lock().unwrap().push(request);
        self.outcomes.lock().unwrap().pop_front().unwrap_or_else(|| {
            Ok(Completion {
                text: "ok".to_string(),
                citations: Vec::new(),
            })
        })
    }
}

pub fn settings() -> ChatSettings {
    ChatSettings {
        model: "test-model".to_string(),
        system_instruction: "Test instruction.".to_string(),
        grounding: false,
    }
}

pub fn connect_ok() -> Result<Arc<dyn CompletionProvider>, ProviderError> {
    Ok(Arc::new(ScriptedProvider::new()))
}

/// Creates a test App with a ready chat session.
pub fn test_app() -> crate::core::state::App {
    let session = ChatSession::with_provider(Arc::new(ScriptedProvider::new()), settings());
    crate::core::state::App::new(session)
}

/// Creates a test App whose assistant is disabled.
pub fn disabled_app() -> crate::core::state::App {
    let session = ChatSession::initialize(None, settings(), |_| connect_ok());
    crate::core::state::App::new(session)
}
