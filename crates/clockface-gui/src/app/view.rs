use clockface_core::modules::Module;
use iced::{Element, Length, Theme, widget::container};

use super::state::{App, Message};
use crate::views::clock::render_clock;

impl App {
    pub fn title(&self) -> String {
        String::from("clockface")
    }

    pub fn theme(&self) -> Theme {
        Theme::Dark
    }

    pub fn view(&self) -> Element<'_, Message> {
        container(render_clock(&self.clock.view(())))
            .center(Length::Fill)
            .padding(16)
            .into()
    }
}
