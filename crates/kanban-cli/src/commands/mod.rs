pub mod board;
pub mod chat;
pub mod dispatch;
pub mod schema;
pub mod shared;
pub mod task;
