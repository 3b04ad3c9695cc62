//! Entity structs for the board's domain objects.
//!
//! `Task` maps to the `tasks` table (local libSQL store) and to the
//! `tasks` resource of the remote store. All structs derive `Serialize`,
//! `Deserialize`, and `JsonSchema` for JSON roundtrip and schema export.

mod message;
mod task;

pub use message::ChatMessage;
pub use task::Task;
