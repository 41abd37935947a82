//! Upload progress store.
//!
//! Tracks one in-flight post upload through `idle -> uploading ->
//! success|error -> idle`. Terminal states schedule a delayed return to
//! idle; the returned [`AutoReset`] ticket carries the generation the
//! reset was issued for, and [`UploadStore::apply_auto_reset`] refuses
//! stale generations so a delayed reset can never clobber a state the
//! user already reset (or a newer upload) in the meantime.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{UPLOAD_FAILURE_RESET_DELAY, UPLOAD_SUCCESS_RESET_DELAY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UploadStatus {
    #[default]
    Idle,
    Uploading,
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostType {
    Video,
    Image,
    Text,
}

/// Ticket for a scheduled return to idle. The holder is expected to fire
/// `apply_auto_reset(generation)` after `delay` has elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoReset {
    pub generation: u64,
    pub delay: Duration,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct UploadStore {
    status: UploadStatus,
    progress: f64,
    post_type: Option<PostType>,
    should_refresh_reels: bool,
    should_refresh_feed: bool,
    generation: u64,
}

/// Serializable view of the store for the shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct UploadSnapshot {
    pub status: UploadStatus,
    pub progress: f64,
    pub post_type: Option<PostType>,
    pub should_refresh_reels: bool,
    pub should_refresh_feed: bool,
}

impl UploadStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Begins a new upload. Starting invalidates any reset still pending
    /// from a previous upload.
    pub fn start(&mut self, post_type: PostType) {
        self.generation += 1;
        self.status = UploadStatus::Uploading;
        self.progress = 0.0;
        self.post_type = Some(post_type);
        self.should_refresh_reels = false;
        self.should_refresh_feed = false;
    }

    /// Progress updates outside `Uploading` (or non-finite values) are
    /// ignored; in-range reports are clamped to `[0, 1]`.
    pub fn update_progress(&mut self, progress: f64) {
        if self.status != UploadStatus::Uploading || !progress.is_finite() {
            return;
        }
        self.progress = progress.clamp(0.0, 1.0);
    }

    /// Marks the upload successful: progress snaps to 1, the refresh flag
    /// matching the post type is raised, and a 2-second auto-reset ticket
    /// is returned. `None` when there was no upload in flight.
    #[must_use]
    pub fn complete(&mut self) -> Option<AutoReset> {
        if self.status != UploadStatus::Uploading {
            return None;
        }
        self.status = UploadStatus::Success;
        self.progress = 1.0;
        match self.post_type {
            Some(PostType::Video) => self.should_refresh_reels = true,
            Some(PostType::Image | PostType::Text) => self.should_refresh_feed = true,
            None => {}
        }
        Some(AutoReset {
            generation: self.generation,
            delay: UPLOAD_SUCCESS_RESET_DELAY,
        })
    }

    /// Marks the upload failed and returns a 3-second auto-reset ticket.
    #[must_use]
    pub fn fail(&mut self) -> Option<AutoReset> {
        if self.status != UploadStatus::Uploading {
            return None;
        }
        self.status = UploadStatus::Error;
        Some(AutoReset {
            generation: self.generation,
            delay: UPLOAD_FAILURE_RESET_DELAY,
        })
    }

    /// Immediate manual reset: clears everything, including both refresh
    /// flags, and stales any scheduled auto-reset.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.status = UploadStatus::Idle;
        self.progress = 0.0;
        self.post_type = None;
        self.should_refresh_reels = false;
        self.should_refresh_feed = false;
    }

    /// Delayed transition back to idle. Applies only when the generation
    /// still matches and the store is in a terminal state; returns whether
    /// it applied. Refresh flags are left for the consumer to clear.
    pub fn apply_auto_reset(&mut self, generation: u64) -> bool {
        if generation != self.generation
            || !matches!(self.status, UploadStatus::Success | UploadStatus::Error)
        {
            return false;
        }
        self.status = UploadStatus::Idle;
        self.progress = 0.0;
        self.post_type = None;
        true
    }

    pub fn clear_reel_refresh(&mut self) {
        self.should_refresh_reels = false;
    }

    pub fn clear_feed_refresh(&mut self) {
        self.should_refresh_feed = false;
    }

    #[must_use]
    pub const fn status(&self) -> UploadStatus {
        self.status
    }

    #[must_use]
    pub const fn progress(&self) -> f64 {
        self.progress
    }

    #[must_use]
    pub const fn post_type(&self) -> Option<PostType> {
        self.post_type
    }

    #[must_use]
    pub const fn should_refresh_reels(&self) -> bool {
        self.should_refresh_reels
    }

    #[must_use]
    pub const fn should_refresh_feed(&self) -> bool {
        self.should_refresh_feed
    }

    /// Current reset generation; tickets minted against an older value are
    /// stale.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn snapshot(&self) -> UploadSnapshot {
        UploadSnapshot {
            status: self.status,
            progress: self.progress,
            post_type: self.post_type,
            should_refresh_reels: self.should_refresh_reels,
            should_refresh_feed: self.should_refresh_feed,
        }
    }
}
