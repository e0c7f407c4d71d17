use std::sync::{Arc, Mutex};

use clockface_core::{
    ModuleContext,
    event_bus::{EventReceiver, EventSender},
    modules::{
        self, Module,
        clock::{Clock, Lifecycle},
    },
};
use clockface_proto::{config::Config, ports::clock::ClockSource};
use flexi_logger::LoggerHandle;
use iced::Task;
use log::error;
use tokio::runtime::Handle;

use super::{bus::BusFlushOutcome, poll_cadence::PollCadence};

pub struct App {
    pub(super) logger:         LoggerHandle,
    pub(super) bus_receiver:   Arc<Mutex<EventReceiver>>,
    pub(super) poll_cadence:   PollCadence,
    pub(super) module_context: ModuleContext,
    pub config:                Config,
    pub clock:                 Clock,
}

#[derive(Debug, Clone)]
pub enum Message {
    None,
    PollBus,
    BusFlushed(BusFlushOutcome),
    Clock(modules::clock::Message),
    CloseRequested,
}

impl App {
    pub fn new(
        (logger, config, clock_source, event_sender, runtime_handle, bus_receiver): (
            LoggerHandle,
            Config,
            Arc<dyn ClockSource>,
            EventSender,
            Handle,
            EventReceiver,
        ),
    ) -> impl FnOnce() -> (Self, Task<Message>) {
        move || {
            let module_context = ModuleContext::new(event_sender, runtime_handle);
            let mut app = App {
                logger,
                bus_receiver: Arc::new(Mutex::new(bus_receiver)),
                poll_cadence: PollCadence::default(),
                module_context,
                clock: Clock::new(clock_source),
                config,
            };

            app.register_modules();

            (app, Task::none())
        }
    }

    fn register_modules(&mut self) {
        if let Err(err) = self
            .clock
            .register(&self.module_context, self.config.clock.tick_interval())
        {
            error!("Failed to mount clock: {err}");
        }
    }

    pub(super) fn unregister_modules(&mut self) {
        if self.clock.lifecycle() == Lifecycle::Mounted {
            self.clock.unregister();
        }
    }
}
