pub mod provider;
pub mod providers;
pub mod types;

pub use provider::{CompletionProvider, ProviderError};
pub use providers::GeminiProvider;
pub use types::{Citation, Completion, CompletionRequest, Message, Role};
