mod app_context;
mod notifier;
mod project_root;

pub use app_context::{AppContext, Board};
pub use notifier::ConsoleNotifier;
pub use project_root::resolve_project_root;
