//! Events the shell (or a capability callback) feeds into the core.

use crate::keyboard::KeyboardState;
use crate::products::ProductEnvelope;
use crate::stores::{ChatMessage, ChatSummary, PostType, TabPress, ThemeMode};

pub type ProductResult = crux_http::Result<crux_http::Response<ProductEnvelope>>;

#[derive(Debug)]
pub enum Event {
    AppStarted,

    // Tab bar
    TabBarHiddenSet { hidden: bool },
    CameraOverlaySet { active: bool },
    TabPressed { route: String, press: TabPress },

    // Upload lifecycle
    UploadStarted { post_type: PostType },
    UploadProgressed { progress: f64 },
    UploadCompleted,
    UploadFailed,
    UploadReset,
    UploadAutoReset { generation: u64 },
    ReelRefreshHandled,
    FeedRefreshHandled,

    // Chat
    MessagesReplaced(Vec<ChatMessage>),
    MessagePrepended(ChatMessage),
    MessagesCleared,
    ChatListReplaced(Vec<ChatSummary>),
    ChatListPrepended(ChatSummary),
    ChatListCleared,

    // Composer and mentions
    RosterUpdated { usernames: Vec<String> },
    ComposerTextChanged { text: String },
    ComposerCleared,

    // Keyboard
    KeyboardFrame { state: KeyboardState, height: f64 },

    // Theme
    ThemeSet { mode: ThemeMode },
    ThemeToggled,

    // Product detail
    ProductDetailRequested { id: String },
    ProductDetailResponse(Box<ProductResult>),
    ProductDetailDismissed,
}

impl Event {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::AppStarted => "AppStarted",
            Self::TabBarHiddenSet { .. } => "TabBarHiddenSet",
            Self::CameraOverlaySet { .. } => "CameraOverlaySet",
            Self::TabPressed { .. } => "TabPressed",
            Self::UploadStarted { .. } => "UploadStarted",
            Self::UploadProgressed { .. } => "UploadProgressed",
            Self::UploadCompleted => "UploadCompleted",
            Self::UploadFailed => "UploadFailed",
            Self::UploadReset => "UploadReset",
            Self::UploadAutoReset { .. } => "UploadAutoReset",
            Self::ReelRefreshHandled => "ReelRefreshHandled",
            Self::FeedRefreshHandled => "FeedRefreshHandled",
            Self::MessagesReplaced(_) => "MessagesReplaced",
            Self::MessagePrepended(_) => "MessagePrepended",
            Self::MessagesCleared => "MessagesCleared",
            Self::ChatListReplaced(_) => "ChatListReplaced",
            Self::ChatListPrepended(_) => "ChatListPrepended",
            Self::ChatListCleared => "ChatListCleared",
            Self::RosterUpdated { .. } => "RosterUpdated",
            Self::ComposerTextChanged { .. } => "ComposerTextChanged",
            Self::ComposerCleared => "ComposerCleared",
            Self::KeyboardFrame { .. } => "KeyboardFrame",
            Self::ThemeSet { .. } => "ThemeSet",
            Self::ThemeToggled => "ThemeToggled",
            Self::ProductDetailRequested { .. } => "ProductDetailRequested",
            Self::ProductDetailResponse(_) => "ProductDetailResponse",
            Self::ProductDetailDismissed => "ProductDetailDismissed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Events move through the capability queue by value; large payloads are
    // boxed so the enum itself stays small.
    #[test]
    fn event_stays_small() {
        assert!(std::mem::size_of::<Event>() <= 128);
    }

    #[test]
    fn names_match_variants() {
        assert_eq!(Event::AppStarted.name(), "AppStarted");
        assert_eq!(Event::UploadCompleted.name(), "UploadCompleted");
    }
}
