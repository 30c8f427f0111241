//! Storage models: messages, their reference entities and the result envelope.

mod db_records;
mod level;
mod message;
mod object_log;

pub use db_records::DbRecords;
pub use level::Level;
pub use message::Message;
pub use object_log::ObjectLog;
