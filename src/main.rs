use std::path::PathBuf;
use std::sync::Arc;

use iced::widget::{column, container, text, Column};
use iced::{event, window, Alignment, Element, Event, Length, Subscription, Task, Theme};
use rfd::FileDialog;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod error;
mod estimate;
mod photo;
mod state;
mod ui;

use api::HttpTransport;
use config::ApiConfig;
use error::EstimateError;
use estimate::Estimator;
use state::data::{EstimationResult, SelectedImage};
use state::session::Session;

/// Extensions offered by the file picker
const IMAGE_EXTENSIONS: [&str; 8] = ["jpg", "jpeg", "png", "webp", "gif", "bmp", "tif", "tiff"];

/// Main application state
struct CalorieEstimator {
    /// Selection, preview, loading flag, error and result
    session: Session,
    /// Runs estimation cycles against the API
    estimator: Estimator<HttpTransport>,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// User clicked the "Choose Image" button
    ChooseImage,
    /// A file was dropped onto the window
    FileDropped(PathBuf),
    /// User clicked the "Estimate Calories" button
    Estimate,
    /// Background estimation cycle finished
    EstimateFinished(Result<EstimationResult, Arc<EstimateError>>),
}

impl CalorieEstimator {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let config = ApiConfig::load();
        info!("🍽️  Food Calorie Estimator ready");

        (
            CalorieEstimator {
                session: Session::new(),
                estimator: Estimator::new(HttpTransport::new(), config),
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::ChooseImage => {
                // Show the native file picker dialog
                let picked = FileDialog::new()
                    .set_title("Select a Food Photo")
                    .add_filter("Images", &IMAGE_EXTENSIONS)
                    .pick_file();

                self.session.select(SelectedImage::from_picked(picked));
                Task::none()
            }
            Message::FileDropped(path) => {
                self.session.select(SelectedImage::from_path(path));
                Task::none()
            }
            Message::Estimate => {
                let Some(image) = self.session.begin_estimate() else {
                    return Task::none();
                };

                // Launch the async estimation cycle
                let estimator = self.estimator.clone();
                Task::perform(
                    async move { estimator.estimate(image).await.map_err(Arc::new) },
                    Message::EstimateFinished,
                )
            }
            Message::EstimateFinished(outcome) => {
                self.session.finish_estimate(outcome);
                Task::none()
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let mut content: Column<Message> = column![
            text("Food Calorie Estimator").size(36),
            text("Upload Food Image").size(14),
            ui::panels::choose_button(&self.session),
        ]
        .spacing(20)
        .padding(32)
        .max_width(480.0)
        .align_x(Alignment::Center);

        if let (Some(handle), Some(image)) = (self.session.preview(), self.session.selected()) {
            content = content.push(ui::panels::preview(handle, &image.file_name));
        }

        content = content.push(ui::panels::estimate_button(&self.session));

        if let Some(message) = self.session.error() {
            content = content.push(ui::panels::error_banner(message));
        }

        if let Some(panel) = self.session.result().and_then(ui::panels::results) {
            content = content.push(panel);
        }

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into()
    }

    /// Listen for files dropped onto the window
    fn subscription(&self) -> Subscription<Message> {
        event::listen_with(|event, _status, _window| match event {
            Event::Window(window::Event::FileDropped(path)) => Some(Message::FileDropped(path)),
            _ => None,
        })
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Light
    }
}

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    iced::application(
        "Food Calorie Estimator",
        CalorieEstimator::update,
        CalorieEstimator::view,
    )
    .subscription(CalorieEstimator::subscription)
    .theme(CalorieEstimator::theme)
    .centered()
    .run_with(CalorieEstimator::new)
}
