//! Delay capability: asks the shell to call back after a duration.
//!
//! The core never sleeps; the shell owns the timer and answers with a
//! [`DelayOutput`] once it fires. Consumers that need cancellation tag the
//! resulting event with a generation and ignore stale deliveries (see the
//! upload store's auto-reset).

use std::time::Duration;

use crux_core::capability::{Capability, CapabilityContext, Operation};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayOperation {
    pub duration_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayOutput;

impl Operation for DelayOperation {
    type Output = DelayOutput;
}

pub struct Delay<Ev> {
    context: CapabilityContext<DelayOperation, Ev>,
}

impl<Ev> Delay<Ev> {
    #[must_use]
    pub fn new(context: CapabilityContext<DelayOperation, Ev>) -> Self {
        Self { context }
    }
}

impl<Ev> Delay<Ev>
where
    Ev: Send + 'static,
{
    /// Schedules `make_event` to be fed back into the app after `duration`.
    pub fn start<F>(&self, duration: Duration, make_event: F)
    where
        F: FnOnce(DelayOutput) -> Ev + Send + 'static,
    {
        let context = self.context.clone();
        let duration_ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        self.context.spawn(async move {
            let output = context
                .request_from_shell(DelayOperation { duration_ms })
                .await;
            context.update_app(make_event(output));
        });
    }
}

impl<Ev> Capability<Ev> for Delay<Ev> {
    type Operation = DelayOperation;
    type MappedSelf<MappedEv> = Delay<MappedEv>;

    fn map_event<F, NewEv>(&self, f: F) -> Self::MappedSelf<NewEv>
    where
        F: Fn(NewEv) -> Ev + Send + Sync + 'static,
        Ev: 'static,
        NewEv: 'static + Send,
    {
        Delay::new(self.context.map_event(f))
    }
}
