//! Shared client core for the Bazaar mobile apps.
//!
//! Holds the state and behavior both shells (iOS and Android) agree on:
//! tab-bar chrome, the upload lifecycle, chat buffers, mention scanning in
//! the composer, the keyboard bridge and the product-detail fetch. The
//! shells render the [`ViewModel`] and feed [`Event`]s back in.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod capabilities;
pub mod error;
pub mod event;
pub mod keyboard;
pub mod mentions;
pub mod model;
pub mod products;
pub mod stores;

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub use capabilities::{Capabilities, Delay, DelayOperation, DelayOutput, Effect};
pub use error::{AppError, ErrorKind};
pub use event::{Event, ProductResult};
pub use keyboard::{KeyboardBridge, KeyboardBridgeConfig, KeyboardSnapshot, KeyboardState};
pub use mentions::{extract_confirmed_mentions, MentionEntity, MentionMatcher, MentionTrigger};
pub use model::{Model, TabSignalView};
pub use products::{Product, ProductDetailState, ProductEnvelope};
pub use stores::{
    ChatBuffer, ChatId, ChatMessage, ChatSummary, MessageId, PostType, TabBarStore, TabPress,
    TabRouteHandler, ThemeMode, ThemeStore, UploadSnapshot, UploadStatus, UploadStore,
};

use stores::AutoReset;

/// How long a successful upload banner stays up before snapping back to
/// idle.
pub const UPLOAD_SUCCESS_RESET_DELAY: Duration = Duration::from_secs(2);

/// Failure banners linger a little longer so the user can read them.
pub const UPLOAD_FAILURE_RESET_DELAY: Duration = Duration::from_secs(3);

/// Live keyboard height above this many layout units counts as visible,
/// whatever the reported transition state says.
pub const MIN_VISIBLE_KEYBOARD_HEIGHT: f64 = 1.0;

pub const FEED_ROUTE: &str = "Feed";
pub const REELS_ROUTE: &str = "Reels";

pub const PRODUCT_API_BASE: &str = "https://api.bazaar.app";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TabBarView {
    pub hidden: bool,
    pub camera_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ComposerView {
    pub text: String,
    pub mentions: Vec<MentionEntity>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ViewModel {
    pub tab_bar: TabBarView,
    pub feed_tab: TabSignalView,
    pub reels_tab: TabSignalView,
    pub upload: UploadSnapshot,
    pub message_count: usize,
    pub chat_count: usize,
    pub composer: ComposerView,
    pub keyboard: KeyboardSnapshot,
    pub theme: ThemeMode,
    pub product_detail: ProductDetailState,
}

#[derive(Default)]
pub struct App;

impl crux_core::App for App {
    type Event = Event;
    type Model = Model;
    type ViewModel = ViewModel;
    type Capabilities = Capabilities;

    #[allow(clippy::too_many_lines)]
    fn update(&self, event: Self::Event, model: &mut Self::Model, caps: &Self::Capabilities) {
        tracing::debug!(event = event.name(), "handling event");

        match event {
            Event::AppStarted => {
                Self::register_tab_routes(model);
                caps.render.render();
            }

            Event::TabBarHiddenSet { hidden } => {
                model.tab_bar.set_hidden(hidden);
                caps.render.render();
            }
            Event::CameraOverlaySet { active } => {
                model.tab_bar.set_camera_active(active);
                caps.render.render();
            }
            Event::TabPressed { route, press } => {
                if model.tab_bar.dispatch(&route, press) {
                    caps.render.render();
                } else {
                    tracing::debug!(route = %route, "tab press on unregistered route");
                }
            }

            Event::UploadStarted { post_type } => {
                model.upload.start(post_type);
                caps.render.render();
            }
            Event::UploadProgressed { progress } => {
                model.upload.update_progress(progress);
                caps.render.render();
            }
            Event::UploadCompleted => {
                if let Some(ticket) = model.upload.complete() {
                    Self::schedule_auto_reset(caps, ticket);
                }
                caps.render.render();
            }
            Event::UploadFailed => {
                if let Some(ticket) = model.upload.fail() {
                    Self::schedule_auto_reset(caps, ticket);
                }
                caps.render.render();
            }
            Event::UploadReset => {
                model.upload.reset();
                caps.render.render();
            }
            Event::UploadAutoReset { generation } => {
                if model.upload.apply_auto_reset(generation) {
                    caps.render.render();
                } else {
                    tracing::debug!(generation, "ignoring stale upload auto-reset");
                }
            }
            Event::ReelRefreshHandled => {
                model.upload.clear_reel_refresh();
                caps.render.render();
            }
            Event::FeedRefreshHandled => {
                model.upload.clear_feed_refresh();
                caps.render.render();
            }

            Event::MessagesReplaced(messages) => {
                model.messages.replace_all(messages);
                caps.render.render();
            }
            Event::MessagePrepended(message) => {
                model.messages.prepend(message);
                caps.render.render();
            }
            Event::MessagesCleared => {
                model.messages.clear();
                caps.render.render();
            }
            Event::ChatListReplaced(chats) => {
                model.chat_list.replace_all(chats);
                caps.render.render();
            }
            Event::ChatListPrepended(chat) => {
                model.chat_list.prepend(chat);
                caps.render.render();
            }
            Event::ChatListCleared => {
                model.chat_list.clear();
                caps.render.render();
            }

            Event::RosterUpdated { usernames } => {
                model.set_roster(usernames);
                caps.render.render();
            }
            Event::ComposerTextChanged { text } => {
                model.set_composer_text(text);
                caps.render.render();
            }
            Event::ComposerCleared => {
                model.set_composer_text(String::new());
                caps.render.render();
            }

            Event::KeyboardFrame { state, height } => {
                // Frames arrive at animation rate; only changed snapshots
                // are worth a render.
                if model
                    .keyboard
                    .observe(keyboard::KeyboardFrame { state, height })
                    .is_some()
                {
                    caps.render.render();
                }
            }

            Event::ThemeSet { mode } => {
                model.theme.set(mode);
                caps.render.render();
            }
            Event::ThemeToggled => {
                model.theme.toggle();
                caps.render.render();
            }

            Event::ProductDetailRequested { id } => {
                model.product_detail.begin();
                caps.http
                    .get(format!("{PRODUCT_API_BASE}/api/products/product/{id}"))
                    .expect_json()
                    .send(|result| Event::ProductDetailResponse(Box::new(result)));
                caps.render.render();
            }
            Event::ProductDetailResponse(result) => {
                Self::apply_product_response(model, *result);
                caps.render.render();
            }
            Event::ProductDetailDismissed => {
                model.product_detail.dismiss();
                caps.render.render();
            }
        }
    }

    fn view(&self, model: &Self::Model) -> Self::ViewModel {
        ViewModel {
            tab_bar: TabBarView {
                hidden: model.tab_bar.is_hidden(),
                camera_active: model.tab_bar.is_camera_active(),
            },
            feed_tab: model.tab_signals.feed.view(),
            reels_tab: model.tab_signals.reels.view(),
            upload: model.upload.snapshot(),
            message_count: model.messages.len(),
            chat_count: model.chat_list.len(),
            composer: ComposerView {
                text: model.composer_text.clone(),
                mentions: model.composer_mentions.clone(),
            },
            keyboard: model.keyboard.snapshot(),
            theme: model.theme.mode(),
            product_detail: model.product_detail.clone(),
        }
    }
}

impl App {
    /// Wires the routes the core knows about to their signal cells. Presses
    /// on any other route are shell-local and ignored here.
    fn register_tab_routes(model: &mut Model) {
        let feed_scroll = model.tab_signals.feed.clone();
        let feed_refresh = model.tab_signals.feed.clone();
        model.tab_bar.register(
            FEED_ROUTE,
            TabRouteHandler::new(
                move || feed_scroll.bump_scroll_to_top(),
                move || feed_refresh.bump_refresh(),
            ),
        );

        let reels_scroll = model.tab_signals.reels.clone();
        let reels_refresh = model.tab_signals.reels.clone();
        model.tab_bar.register(
            REELS_ROUTE,
            TabRouteHandler::new(
                move || reels_scroll.bump_scroll_to_top(),
                move || reels_refresh.bump_refresh(),
            ),
        );
    }

    fn schedule_auto_reset(caps: &Capabilities, ticket: AutoReset) {
        let generation = ticket.generation;
        caps.delay
            .start(ticket.delay, move |_| Event::UploadAutoReset { generation });
    }

    fn apply_product_response(model: &mut Model, result: ProductResult) {
        match result {
            Ok(mut response) if response.status().is_success() => {
                if let Some(envelope) = response.take_body() {
                    model.product_detail.resolve(envelope.into_product());
                } else {
                    let err = AppError::new(ErrorKind::EmptyResponse, "product detail body missing");
                    tracing::warn!(error = %err, "product detail fetch failed");
                    model.product_detail.fail(err.user_facing_message());
                }
            }
            Ok(response) => {
                let err = AppError::new(
                    ErrorKind::Network,
                    format!("server returned HTTP {}", response.status()),
                );
                tracing::warn!(error = %err, "product detail fetch failed");
                model.product_detail.fail(err.user_facing_message());
            }
            Err(e) => {
                let err = AppError::new(ErrorKind::Network, e.to_string());
                tracing::warn!(error = %err, "product detail fetch failed");
                model.product_detail.fail(err.user_facing_message());
            }
        }
    }
}
