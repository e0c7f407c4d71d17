mod timer;
mod view;

#[cfg(test)]
mod tests;

use std::{sync::Arc, time::Duration};

use chrono::{DateTime, Local};
use clockface_proto::ports::clock::ClockSource;
use log::{debug, error, info};

pub use timer::RefreshTimer;
pub use view::{ClockView, GREETING};

use crate::{
    ModuleContext,
    adapters::system_clock::SystemClock,
    event_bus::ModuleEvent,
    modules::{Module, ModuleError},
};

/// Clock data for rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockData {
    pub current_time: DateTime<Local>,
}

impl ClockData {
    pub fn new(current_time: DateTime<Local>) -> Self {
        Self { current_time }
    }

    pub fn replace(&mut self, current_time: DateTime<Local>) {
        self.current_time = current_time;
    }
}

/// Where a clock instance is in its life. `Retired` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Unmounted,
    Mounted,
    Retired,
}

/// Message type for host communication
#[derive(Debug, Clone)]
pub enum Message {
    /// Host clock reading taken by the refresh timer.
    Tick(DateTime<Local>),
}

/// Clock component: owns the displayed time and the timer refreshing it.
pub struct Clock {
    source:    Arc<dyn ClockSource>,
    data:      ClockData,
    lifecycle: Lifecycle,
    context:   Option<ModuleContext>,
    timer:     Option<RefreshTimer>,
}

impl std::fmt::Debug for Clock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Clock")
            .field("source", &self.source.name())
            .field("data", &self.data)
            .field("lifecycle", &self.lifecycle)
            .field("timer", &self.timer)
            .finish_non_exhaustive()
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

impl Clock {
    pub fn new(source: Arc<dyn ClockSource>) -> Self {
        let data = ClockData::new(source.now());

        Self {
            source,
            data,
            lifecycle: Lifecycle::Unmounted,
            context: None,
            timer: None,
        }
    }

    /// Get current clock data for rendering
    pub fn data(&self) -> &ClockData {
        &self.data
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn is_timer_active(&self) -> bool {
        self.timer.as_ref().is_some_and(RefreshTimer::is_active)
    }

    /// Attach to the host and start refreshing every `tick_interval`.
    pub fn mount(
        &mut self,
        ctx: &ModuleContext,
        tick_interval: Duration,
    ) -> Result<(), ModuleError> {
        match self.lifecycle {
            Lifecycle::Unmounted => {}
            Lifecycle::Mounted => {
                return Err(ModuleError::registration("clock is already mounted"));
            }
            Lifecycle::Retired => {
                return Err(ModuleError::registration(
                    "clock was unmounted and cannot be mounted again",
                ));
            }
        }

        if tick_interval.is_zero() {
            return Err(ModuleError::registration(
                "clock tick interval must be greater than zero",
            ));
        }

        self.data.replace(self.source.now());

        let sender = ctx.module_sender(ModuleEvent::Clock);
        let source = Arc::clone(&self.source);

        self.timer = Some(RefreshTimer::start(
            ctx.runtime_handle(),
            tick_interval,
            move || {
                if let Err(err) = sender.try_send(Message::Tick(source.now())) {
                    error!("Failed to publish clock tick: {err}");
                }
            },
        ));
        self.context = Some(ctx.clone());
        self.lifecycle = Lifecycle::Mounted;

        info!(
            "Clock mounted at {} using {} source",
            self.data.current_time,
            self.source.name()
        );
        Ok(())
    }

    /// Detach from the host. Only the first call after a mount has an effect.
    pub fn unmount(&mut self) {
        if self.lifecycle != Lifecycle::Mounted {
            debug!("Ignoring unmount of clock in {:?} state", self.lifecycle);
            return;
        }

        if let Some(mut timer) = self.timer.take() {
            timer.cancel();
        }

        self.context = None;
        self.lifecycle = Lifecycle::Retired;
        info!("Clock unmounted");
    }

    /// Update clock state from a host message
    pub fn update(&mut self, message: Message) {
        match message {
            Message::Tick(now) => {
                if self.lifecycle != Lifecycle::Mounted {
                    debug!("Dropping clock tick received in {:?} state", self.lifecycle);
                    return;
                }

                self.data.replace(now);

                if let Some(ctx) = &self.context
                    && let Err(err) = ctx.request_redraw()
                {
                    error!("Failed to request clock redraw: {err}");
                }
            }
        }
    }

    /// Render the greeting and the current time.
    pub fn render(&self) -> ClockView {
        ClockView::render(self.data.current_time, self.source.as_ref())
    }
}

impl Module for Clock {
    type ViewData<'a> = ();
    type RegistrationData<'a> = Duration;
    type Rendered = ClockView;

    fn register(
        &mut self,
        ctx: &ModuleContext,
        tick_interval: Self::RegistrationData<'_>,
    ) -> Result<(), ModuleError> {
        self.mount(ctx, tick_interval)
    }

    fn unregister(&mut self) {
        self.unmount();
    }

    fn view(&self, _data: Self::ViewData<'_>) -> Self::Rendered {
        self.render()
    }
}
