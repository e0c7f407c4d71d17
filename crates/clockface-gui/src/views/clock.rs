//! Clock module view layer - Pure rendering, no business logic

use clockface_core::modules::clock::ClockView;
use iced::{
    Alignment, Element,
    widget::{column, text},
};

use crate::app::Message;

const GREETING_SIZE: f32 = 32.;
const TIME_SIZE: f32 = 24.;

/// Render the greeting above the time line.
pub(crate) fn render_clock(view: &ClockView) -> Element<'static, Message> {
    let [greeting, time_line] = view.lines();

    column![
        text(greeting.to_owned()).size(GREETING_SIZE),
        text(time_line.to_owned()).size(TIME_SIZE),
    ]
    .spacing(8)
    .align_x(Alignment::Center)
    .into()
}
