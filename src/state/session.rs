use std::fmt::Display;

use iced::widget::image::Handle;
use tracing::{debug, info, warn};

use super::data::{EstimationResult, SelectedImage};
use crate::error::SelectionError;

/// Message shown when the estimate is requested with nothing selected
pub const SELECT_FIRST_MESSAGE: &str = "Please select an image first.";

/// The Session is the single source of truth for the form.
///
/// It is only mutated through the transition methods below, which keep
/// the result and the error message from both being populated at once.
#[derive(Debug, Default)]
pub struct Session {
    selected: Option<SelectedImage>,
    /// Display handle for the selected image; replacing it drops the old one
    preview: Option<Handle>,
    loading: bool,
    error: Option<String>,
    result: Option<EstimationResult>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a file selection (or a cancelled/invalid one)
    pub fn select(&mut self, selection: Result<SelectedImage, SelectionError>) {
        if self.loading {
            debug!("Ignoring selection change while an estimate is in flight");
            return;
        }

        match selection {
            Ok(image) => {
                info!("🖼️  Selected {} ({})", image.file_name, image.mime_type);
                self.preview = Some(Handle::from_path(&image.path));
                self.selected = Some(image);
                self.result = None;
                self.error = None;
            }
            Err(err) => {
                if let SelectionError::NotAnImage(path) = &err {
                    warn!("Rejected non-image selection: {}", path.display());
                }
                self.selected = None;
                self.preview = None;
                self.result = None;
                self.error = Some(err.to_string());
            }
        }
    }

    /// Whether the estimate trigger should be enabled
    pub fn can_estimate(&self) -> bool {
        self.selected.is_some() && !self.loading
    }

    /// Start an estimation cycle
    ///
    /// Returns the image to encode, or `None` when no request should be
    /// dispatched (already loading, or nothing selected).
    pub fn begin_estimate(&mut self) -> Option<SelectedImage> {
        if self.loading {
            debug!("Estimate already in flight, ignoring trigger");
            return None;
        }

        let Some(image) = self.selected.clone() else {
            self.error = Some(SELECT_FIRST_MESSAGE.to_string());
            return None;
        };

        self.loading = true;
        self.error = None;
        self.result = None;
        Some(image)
    }

    /// Apply the outcome of the in-flight estimation cycle
    pub fn finish_estimate<E: Display>(&mut self, outcome: Result<EstimationResult, E>) {
        if !self.loading {
            warn!("Received an estimate outcome with no request in flight");
        }
        self.loading = false;

        match outcome {
            Ok(result) => {
                self.error = None;
                self.result = Some(result);
            }
            Err(err) => {
                self.result = None;
                self.error = Some(err.to_string());
            }
        }
    }

    pub fn selected(&self) -> Option<&SelectedImage> {
        self.selected.as_ref()
    }

    pub fn preview(&self) -> Option<&Handle> {
        self.preview.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn result(&self) -> Option<&EstimationResult> {
        self.result.as_ref()
    }
}
