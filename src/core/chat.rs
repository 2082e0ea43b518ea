//! # Chat Session
//!
//! Owns one conversation with the generative-language service: the transcript,
//! the pending-input draft, and the single-in-flight gate.
//!
//! ```text
//!                 initialize()
//!   uninitialized ─────┬──────────────► Disabled   (permanent)
//!                      │
//!                      ▼
//!                    Ready ──begin_send()──► Sending
//!                      ▲                       │
//!                      └──────complete()───────┘   (success or failure)
//! ```
//!
//! Sending is two-phase. `begin_send` appends the user turn immediately and
//! hands back a `PendingRequest`; whoever drives the I/O dispatches it and
//! passes the outcome to `complete`, which appends exactly one assistant turn.
//! `send` chains both phases for callers that can simply await.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Local};
use log::{debug, info, warn};

use crate::core::citations::{self, compose_reply};
use crate::inference::{
    Citation, Completion, CompletionProvider, CompletionRequest, Message, ProviderError,
};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

pub const DEFAULT_SYSTEM_INSTRUCTION: &str = "You are an expert AI assistant for the 'Digital Record Label Agent System'. \
    Your knowledge base includes details about its architecture (Orchestrator, MCP Server, various agents like Audio Analysis, \
    Metadata, Distribution, Marketing, Rights Licensing, Customer Support, Analytics Reporting), Docker & Kubernetes deployment \
    (Dockerfiles, docker-compose.yml, k8s manifests like ConfigMaps, Secrets, Deployments, Ingress), and verification procedures. \
    Answer questions clearly and concisely, focusing on providing helpful information related to this specific system. \
    If asked about general topics, politely state that you are specialized for the Digital Record Label Agent System. \
    If providing information that might come from external sources via search grounding, clearly state this and list the sources if available.";

const MISSING_CREDENTIAL_NOTICE: &str = "API Key is not configured. AI Assistant is disabled.";
const INIT_FAILED_NOTICE: &str = "Failed to initialize AI. Please check API key configuration.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Author {
    User,
    Assistant,
}

/// One entry of the transcript.
#[derive(Debug, Clone, PartialEq)]
pub struct Turn {
    /// Per-session, strictly increasing.
    pub id: u64,
    pub author: Author,
    /// Markdown-lite text, see `core::render`.
    pub text: String,
    pub created_at: DateTime<Local>,
    /// Displayable grounding sources (assistant turns only).
    pub citations: Vec<Citation>,
}

impl Turn {
    /// Display label for the creation time, e.g. `14:03:27`.
    pub fn time_label(&self) -> String {
        self.created_at.format("%H:%M:%S").to_string()
    }

    /// The text without the sources block, which is shown from `citations`.
    pub fn body(&self) -> &str {
        citations::reply_body(&self.text, &self.citations)
    }
}

/// Why the chat capability is unavailable or why a call failed.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatError {
    /// No credential, or only whitespace. Permanent.
    CapabilityDisabled,
    /// Credential present but the client could not be built. Permanent.
    InitializationFailed(String),
    /// A single call failed. The session stays usable.
    RequestFailed(String),
}

impl fmt::Display for ChatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatError::CapabilityDisabled => write!(f, "chat capability disabled: no API key"),
            ChatError::InitializationFailed(msg) => write!(f, "client initialization failed: {msg}"),
            ChatError::RequestFailed(msg) => write!(f, "request failed: {msg}"),
        }
    }
}

impl std::error::Error for ChatError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapabilityState {
    Disabled,
    Ready,
    Sending,
}

/// Fixed per-process settings for a session.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatSettings {
    pub model: String,
    pub system_instruction: String,
    pub grounding: bool,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            system_instruction: DEFAULT_SYSTEM_INSTRUCTION.to_string(),
            grounding: false,
        }
    }
}

/// The outbound half of a send: a fully built request and the provider to run it on.
pub struct PendingRequest {
    provider: Arc<dyn CompletionProvider>,
    pub request: CompletionRequest,
}

impl fmt::Debug for PendingRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingRequest")
            .field("provider", &self.provider.name())
            .field("model", &self.request.model)
            .field("messages", &self.request.messages.len())
            .finish()
    }
}

impl PendingRequest {
    /// Runs the call to completion. No timeout or retry is applied here.
    pub async fn dispatch(self) -> Result<Completion, ProviderError> {
        debug!(
            "Dispatching to {} ({} messages)",
            self.provider.name(),
            self.request.messages.len()
        );
        self.provider.complete(self.request).await
    }
}

pub struct ChatSession {
    provider: Option<Arc<dyn CompletionProvider>>,
    disabled: Option<ChatError>,
    settings: ChatSettings,
    transcript: Vec<Turn>,
    draft: String,
    in_flight: bool,
    next_id: u64,
    failure: Option<ChatError>,
}

impl ChatSession {
    /// Decides the capability once.
    ///
    /// A missing, empty or whitespace-only credential disables the session
    /// without calling `connect`. A `connect` failure disables it too.
    pub fn initialize<F>(credential: Option<&str>, settings: ChatSettings, connect: F) -> Self
    where
        F: FnOnce(&str) -> Result<Arc<dyn CompletionProvider>, ProviderError>,
    {
        let credential = credential.map(str::trim).filter(|c| !c.is_empty());
        let Some(credential) = credential else {
            warn!("No API key configured, AI assistant disabled");
            return Self::disabled(ChatError::CapabilityDisabled, settings);
        };

        match connect(credential) {
            Ok(provider) => {
                info!("Chat client initialized ({})", provider.name());
                Self::with_provider(provider, settings)
            }
            Err(e) => {
                warn!("Failed to initialize chat client: {}", e);
                Self::disabled(ChatError::InitializationFailed(e.to_string()), settings)
            }
        }
    }

    /// A ready session backed by the given provider.
    pub fn with_provider(provider: Arc<dyn CompletionProvider>, settings: ChatSettings) -> Self {
        Self {
            provider: Some(provider),
            disabled: None,
            ..Self::disabled(ChatError::CapabilityDisabled, settings)
        }
    }

    fn disabled(reason: ChatError, settings: ChatSettings) -> Self {
        Self {
            provider: None,
            disabled: Some(reason),
            settings,
            transcript: Vec::new(),
            draft: String::new(),
            in_flight: false,
            next_id: 1,
            failure: None,
        }
    }

    pub fn capability_state(&self) -> CapabilityState {
        if self.provider.is_none() {
            CapabilityState::Disabled
        } else if self.in_flight {
            CapabilityState::Sending
        } else {
            CapabilityState::Ready
        }
    }

    pub fn disabled_reason(&self) -> Option<&ChatError> {
        self.disabled.as_ref()
    }

    /// Standing message shown in place of the chat when disabled.
    pub fn disabled_notice(&self) -> Option<&'static str> {
        match self.disabled {
            Some(ChatError::InitializationFailed(_)) => Some(INIT_FAILED_NOTICE),
            Some(_) => Some(MISSING_CREDENTIAL_NOTICE),
            None => None,
        }
    }

    pub fn current_transcript(&self) -> &[Turn] {
        &self.transcript
    }

    pub fn settings(&self) -> &ChatSettings {
        &self.settings
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut String {
        &mut self.draft
    }

    /// The most recent failed call, if not yet dismissed.
    pub fn last_failure(&self) -> Option<&ChatError> {
        self.failure.as_ref()
    }

    /// Banner text for `last_failure`.
    pub fn last_error(&self) -> Option<String> {
        match &self.failure {
            Some(ChatError::RequestFailed(detail)) => {
                Some(format!("Failed to get response from AI: {detail}"))
            }
            _ => None,
        }
    }

    pub fn dismiss_error(&mut self) {
        self.failure = None;
    }

    /// Phase one of a send.
    ///
    /// No-op (returns None) when the trimmed text is empty, a request is in
    /// flight, or the capability is disabled. Otherwise appends the user turn,
    /// clears the draft, raises the in-flight flag and returns the request.
    pub fn begin_send(&mut self, text: &str) -> Option<PendingRequest> {
        if text.trim().is_empty() || self.in_flight {
            return None;
        }
        let provider = self.provider.clone()?;

        self.push_turn(Author::User, text.to_string(), Vec::new());
        self.draft.clear();
        self.in_flight = true;
        self.failure = None;

        let messages = self
            .transcript
            .iter()
            .map(|turn| match turn.author {
                Author::User => Message::user(turn.text.clone()),
                Author::Assistant => Message::model(turn.text.clone()),
            })
            .collect();

        info!(
            "Sending message ({} bytes, {} turns in transcript)",
            text.len(),
            self.transcript.len()
        );

        Some(PendingRequest {
            provider,
            request: CompletionRequest {
                model: self.settings.model.clone(),
                messages,
                system_instruction: self.settings.system_instruction.clone(),
                grounding: self.settings.grounding,
            },
        })
    }

    /// Sends the current draft.
    pub fn submit_draft(&mut self) -> Option<PendingRequest> {
        let text = self.draft.clone();
        self.begin_send(&text)
    }

    /// Phase two of a send: appends exactly one assistant turn and clears the
    /// in-flight flag. Ignored if nothing is in flight.
    pub fn complete(&mut self, outcome: Result<Completion, ProviderError>) -> Option<&Turn> {
        if !self.in_flight {
            warn!("Completion received with no request in flight, ignoring");
            return None;
        }
        self.in_flight = false;

        match outcome {
            Ok(completion) => {
                let citations = citations::displayable(completion.citations);
                let text = compose_reply(&completion.text, &citations);
                info!(
                    "Response received ({} bytes, {} citations)",
                    completion.text.len(),
                    citations.len()
                );
                Some(self.push_turn(Author::Assistant, text, citations))
            }
            Err(e) => {
                warn!("Chat request failed: {}", e);
                let detail = e.message();
                let text = format!(
                    "Sorry, I encountered an error: {}",
                    detail.unwrap_or("Please try again later.")
                );
                self.failure = Some(ChatError::RequestFailed(
                    detail.unwrap_or("Unknown error").to_string(),
                ));
                Some(self.push_turn(Author::Assistant, text, Vec::new()))
            }
        }
    }

    /// Both phases in one call. Returns the assistant turn, or None if the
    /// send was a precondition no-op.
    pub async fn send(&mut self, text: &str) -> Option<&Turn> {
        let pending = self.begin_send(text)?;
        let outcome = pending.dispatch().await;
        self.complete(outcome)
    }

    fn push_turn(&mut self, author: Author, text: String, citations: Vec<Citation>) -> &Turn {
        let turn = Turn {
            id: self.next_id,
            author,
            text,
            created_at: Local::now(),
            citations,
        };
        self.next_id += 1;
        let index = self.transcript.len();
        self.transcript.push(turn);
        &self.transcript[index]
    }
}
