mod delay;

pub use self::delay::{Delay, DelayOperation, DelayOutput};
pub use crux_core::render::Render;
pub use crux_http::Http;

use crate::{App, Event};

pub type AppRender = Render<Event>;
pub type AppHttp = Http<Event>;
pub type AppDelay = Delay<Event>;

#[derive(crux_core::macros::Effect)]
#[effect(app = "App")]
pub struct Capabilities {
    pub render: Render<Event>,
    pub http: Http<Event>,
    pub delay: Delay<Event>,
}
