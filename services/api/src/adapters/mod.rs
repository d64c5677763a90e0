pub mod db;
pub mod journal;
pub mod reply_fallback;
pub mod reply_llm;

pub use db::DbStore;
pub use journal::CsvJournal;
pub use reply_fallback::{CannedReplyAdapter, UnconfiguredReplyAdapter};
pub use reply_llm::GeminiReplyAdapter;
