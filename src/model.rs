//! Core state.
//!
//! Everything a screen can observe lives here. Tab presses are surfaced to
//! the shell as monotonically increasing sequence numbers rather than
//! callbacks, since closures cannot cross the FFI boundary; the shell
//! compares the sequence in consecutive view models and reacts when it
//! moves.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::keyboard::KeyboardBridge;
use crate::mentions::{MentionEntity, MentionMatcher};
use crate::products::ProductDetailState;
use crate::stores::{
    ChatBuffer, ChatMessage, ChatSummary, TabBarStore, ThemeStore, UploadStore,
};

/// Shared counters a tab-bar handler bumps when its route is pressed.
#[derive(Debug, Clone, Default)]
pub struct TabSignalCell {
    scroll_to_top: Arc<AtomicU32>,
    refresh: Arc<AtomicU32>,
}

impl TabSignalCell {
    pub fn bump_scroll_to_top(&self) {
        self.scroll_to_top.fetch_add(1, Ordering::Relaxed);
    }

    pub fn bump_refresh(&self) {
        self.refresh.fetch_add(1, Ordering::Relaxed);
    }

    #[must_use]
    pub fn view(&self) -> TabSignalView {
        TabSignalView {
            scroll_to_top_seq: self.scroll_to_top.load(Ordering::Relaxed),
            refresh_seq: self.refresh.load(Ordering::Relaxed),
        }
    }
}

/// Snapshot of one route's tab signals, carried in the view model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TabSignalView {
    pub scroll_to_top_seq: u32,
    pub refresh_seq: u32,
}

#[derive(Debug, Clone, Default)]
pub struct TabSignals {
    pub feed: TabSignalCell,
    pub reels: TabSignalCell,
}

#[derive(Default)]
pub struct Model {
    pub tab_bar: TabBarStore,
    pub tab_signals: TabSignals,
    pub upload: UploadStore,
    pub messages: ChatBuffer<ChatMessage>,
    pub chat_list: ChatBuffer<ChatSummary>,
    pub theme: ThemeStore,
    pub keyboard: KeyboardBridge,
    pub roster: Vec<String>,
    pub mention_matcher: MentionMatcher,
    pub composer_text: String,
    pub composer_mentions: Vec<MentionEntity>,
    pub product_detail: ProductDetailState,
}

impl Model {
    /// Installs a new follow roster and rescans the composer against it.
    pub fn set_roster(&mut self, usernames: Vec<String>) {
        self.mention_matcher = MentionMatcher::new(&usernames);
        self.roster = usernames;
        self.composer_mentions = self.mention_matcher.scan(&self.composer_text);
    }

    pub fn set_composer_text(&mut self, text: String) {
        self.composer_mentions = self.mention_matcher.scan(&text);
        self.composer_text = text;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roster_change_rescans_existing_composer_text() {
        let mut model = Model::default();
        model.set_composer_text("hello @ana".into());
        assert!(model.composer_mentions.is_empty());

        model.set_roster(vec!["ana".into()]);
        assert_eq!(model.composer_mentions.len(), 1);
        assert_eq!(model.composer_mentions[0].username, "ana");
    }

    #[test]
    fn tab_signal_cells_share_state_across_clones() {
        let cell = TabSignalCell::default();
        let handle = cell.clone();
        handle.bump_refresh();
        handle.bump_refresh();
        handle.bump_scroll_to_top();

        let view = cell.view();
        assert_eq!(view.refresh_seq, 2);
        assert_eq!(view.scroll_to_top_seq, 1);
    }
}
