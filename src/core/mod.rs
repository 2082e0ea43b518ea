//! # Core Application Logic
//!
//! Everything labeldesk knows about the record label system and its assistant.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • ChatSession          │
//!                    └───────────┬─────────────┘
//!                                │
//!                   ┌────────────┴────────────┐
//!                   ▼                         ▼
//!            ┌────────────┐            ┌────────────┐
//!            │    TUI     │            │   Export   │
//!            │  Adapter   │            │   (HTML)   │
//!            │ (ratatui)  │            │            │
//!            └────────────┘            └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`chat`]: The assistant conversation and its in-flight gate
//! - [`citations`]: Turning grounding sources into a Sources block
//! - [`render`]: Markdown-lite to HTML for display and export
//! - [`catalog`]: Static system components, snippets and verification steps
//! - [`checklist`]: Verification progress
//! - [`config`]: Layered settings
//! - [`export`]: Transcript as an HTML document

pub mod action;
pub mod catalog;
pub mod chat;
pub mod checklist;
pub mod citations;
pub mod config;
pub mod export;
pub mod render;
pub mod state;
