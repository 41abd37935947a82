pub mod chat;
pub mod tab_bar;
pub mod theme;
pub mod upload;

pub use self::chat::{ChatBuffer, ChatId, ChatMessage, ChatSummary, MessageId};
pub use self::tab_bar::{TabBarStore, TabCallback, TabPress, TabRouteHandler};
pub use self::theme::{ThemeMode, ThemeStore};
pub use self::upload::{AutoReset, PostType, UploadSnapshot, UploadStatus, UploadStore};
