//! # TUI Components
//!
//! Reusable widgets. Pages compose these; none of them reads `App` directly.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Created each frame from the data they display:
//! - `TabBar`: app name, page tabs and assistant availability
//! - `Message`: one transcript turn
//!
//! ### Stateful Components (Event-Driven)
//!
//! A persistent state struct lives in `TuiState`; a transient view borrows it
//! for one render pass:
//! - `InputBox`: cursor over the chat session's draft
//! - `Transcript` / `TranscriptState`: scrollable turns with height caching
//! - `PageView` / `PageViewState`: scrollable body of the reference pages
//!
//! ## Props-Based Data Flow
//!
//! ```rust,ignore
//! // Dependencies are explicit
//! TabBar { page: app.page, model, capability }.render(frame, area);
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── tab_bar.rs       (Top line)
//! ├── message.rs       (Single turn renderer)
//! ├── transcript.rs    (Scrollable turn container)
//! ├── page_view.rs     (Scrollable static page)
//! └── input_box/       (Draft editor)
//! ```

pub mod input_box;
pub mod message;
pub mod page_view;
pub mod tab_bar;
pub mod transcript;

pub use input_box::{InputBox, InputEvent};
pub use page_view::{PageView, PageViewState};
pub use tab_bar::TabBar;
pub use transcript::TranscriptState;
