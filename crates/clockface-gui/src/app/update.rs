use std::sync::Arc;

use clockface_core::event_bus::{BusEvent, ModuleEvent};
use iced::{Subscription, Task, time, window};
use log::{debug, error, info};

use super::{
    bus::drain_bus,
    state::{App, Message},
};

impl App {
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PollBus => Task::perform(
                drain_bus(Arc::clone(&self.bus_receiver)),
                Message::BusFlushed,
            ),
            Message::BusFlushed(outcome) => {
                if outcome.had_error() {
                    error!("failed to drain event bus, keeping fast cadence");
                    self.poll_cadence.record_events();
                }

                if outcome.is_empty() {
                    if !outcome.had_error() {
                        self.poll_cadence.record_empty();
                    }
                    return Task::none();
                }

                self.poll_cadence.record_events();

                let tasks: Vec<_> = outcome
                    .into_events()
                    .into_iter()
                    .filter_map(App::message_from_bus_event)
                    .map(|msg| self.update(msg))
                    .collect();

                Task::batch(tasks)
            }
            Message::None => Task::none(),
            Message::Clock(message) => {
                self.clock.update(message);
                Task::none()
            }
            Message::CloseRequested => {
                info!("Window close requested, shutting down");
                self.unregister_modules();
                self.logger.flush();
                iced::exit()
            }
        }
    }

    pub(super) fn message_from_bus_event(event: BusEvent) -> Option<Message> {
        match event {
            BusEvent::Redraw => Some(Message::None),
            BusEvent::Module(ModuleEvent::Clock(message)) => Some(Message::Clock(message)),
            other => {
                debug!("Ignoring unhandled bus event: {other:?}");
                None
            }
        }
    }

    pub fn subscription(&self) -> Subscription<Message> {
        Subscription::batch(vec![
            time::every(self.poll_cadence.interval()).map(|_| Message::PollBus),
            window::close_requests().map(|_| Message::CloseRequested),
        ])
    }
}
