/// View building blocks for the estimator window
use iced::widget::image::Handle;
use iced::widget::{button, column, container, image, row, text};
use iced::{ContentFit, Element, Length};

use crate::state::data::EstimationResult;
use crate::state::session::Session;
use crate::Message;

/// Tallest the preview is allowed to render
const PREVIEW_MAX_HEIGHT: f32 = 250.0;

/// "Choose Image" button; disabled while an estimate is in flight
pub fn choose_button<'a>(session: &Session) -> Element<'a, Message> {
    button(text("Choose Image").center().width(Length::Fill))
        .on_press_maybe((!session.is_loading()).then_some(Message::ChooseImage))
        .style(button::primary)
        .padding(12)
        .width(Length::Fill)
        .into()
}

pub fn preview<'a>(handle: &Handle, file_name: &str) -> Element<'a, Message> {
    column![
        text("Image Preview:").size(20),
        image(handle.clone())
            .height(Length::Fixed(PREVIEW_MAX_HEIGHT))
            .content_fit(ContentFit::Contain),
        text(file_name.to_string()).size(12),
    ]
    .spacing(10)
    .align_x(iced::Alignment::Center)
    .into()
}

/// "Estimate Calories" button, enabled only when an estimate can start
pub fn estimate_button<'a>(session: &Session) -> Element<'a, Message> {
    let label = if session.is_loading() {
        "Estimating..."
    } else {
        "Estimate Calories"
    };

    button(text(label).center().width(Length::Fill))
        .on_press_maybe(session.can_estimate().then_some(Message::Estimate))
        .style(button::success)
        .padding(12)
        .width(Length::Fill)
        .into()
}

pub fn error_banner<'a>(message: &str) -> Element<'a, Message> {
    container(text(message.to_string()).size(14).style(text::danger))
        .padding(12)
        .width(Length::Fill)
        .style(container::bordered_box)
        .into()
}

/// Description and calorie estimate; hidden unless both are present
pub fn results<'a>(result: &EstimationResult) -> Option<Element<'a, Message>> {
    if result.description.is_empty() || result.calories.is_empty() {
        return None;
    }

    let panel = column![
        text("Estimation Results:").size(20),
        row![
            text("Description: ").style(text::primary),
            text(result.description.clone()),
        ],
        row![
            text("Estimated Calories: ").style(text::primary),
            text(result.calories.clone()),
        ],
    ]
    .spacing(8);

    Some(
        container(panel)
            .padding(16)
            .width(Length::Fill)
            .style(container::rounded_box)
            .into(),
    )
}
