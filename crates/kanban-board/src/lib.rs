//! # kanban-board
//!
//! The client-side state of the kanban board:
//! - [`BoardController`]: the task collection, kept in step with a
//!   [`kanban_core::TaskStore`] using optimistic updates and reload-on-failure
//! - [`ChatSession`]: the assistant conversation, fed by a streamed reply
//! - [`Notifier`]: where the controller reports "Task created" and friends

pub mod board;
pub mod chat;
pub mod notify;

pub use board::{BoardController, BoardError};
pub use chat::{ChatError, ChatPhase, ChatSession};
pub use notify::{Notice, NoticeLevel, Notifier, TracingNotifier};
