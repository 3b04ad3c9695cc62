//! # kanban-core
//!
//! Core types, seams, and error types for the kanban board.
//!
//! This crate provides the foundational types shared across all kanban crates:
//! - Entity structs (`Task`, `ChatMessage`) and the `TaskDraft` add intent
//! - Status, priority and role enums with display labels
//! - `TaskUpdate` partial change sets and their builder
//! - The `TaskStore` and `ChatBackend` traits that the board depends on
//! - Cross-cutting error types (`StoreError`, `StreamError`, `CoreError`)

pub mod chat;
pub mod draft;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod store;
pub mod updates;

pub use chat::{ChatBackend, ChunkStream};
pub use draft::TaskDraft;
pub use entities::{ChatMessage, Task};
pub use enums::{ChatRole, TaskPriority, TaskStatus};
pub use errors::{CoreError, StoreError, StreamError};
pub use store::TaskStore;
pub use updates::{TaskUpdate, TaskUpdateBuilder};
