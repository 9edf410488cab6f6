/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the estimation pipeline and the UI layer.

use std::path::{Path, PathBuf};

use image::ImageFormat;

use crate::error::SelectionError;

/// Description shown when the API answered without any content
pub const NO_CONTENT_DESCRIPTION: &str = "No content found in the API response.";

/// Description shown when the JSON answer lacks usable fields
pub const UNPARSED_FIELDS_DESCRIPTION: &str =
    "Could not parse description or calories from the JSON response.";

/// Calorie value used by placeholder results
pub const NOT_AVAILABLE: &str = "N/A";

/// The food photo the user picked
///
/// Only the file handle is kept; bytes are read when an estimate starts.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedImage {
    /// Full path to the image file
    pub path: PathBuf,
    /// Filename only (e.g., "lunch.jpg")
    pub file_name: String,
    /// Declared MIME type (e.g., "image/jpeg")
    pub mime_type: String,
}

impl SelectedImage {
    /// Build a selection from a picked path
    ///
    /// The MIME type comes from the file extension; anything the `image`
    /// crate does not recognise is rejected.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SelectionError> {
        let path = path.as_ref();

        let format = ImageFormat::from_path(path)
            .map_err(|_| SelectionError::NotAnImage(path.to_path_buf()))?;

        let file_name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        Ok(Self {
            path: path.to_path_buf(),
            file_name,
            mime_type: format.to_mime_type().to_string(),
        })
    }

    /// Turn the picker's answer into a selection (None = dialog cancelled)
    pub fn from_picked(picked: Option<PathBuf>) -> Result<Self, SelectionError> {
        match picked {
            Some(path) => Self::from_path(path),
            None => Err(SelectionError::NoFile),
        }
    }
}

/// Parsed model output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EstimationResult {
    pub description: String,
    pub calories: String,
}

impl EstimationResult {
    pub fn new(description: impl Into<String>, calories: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            calories: calories.into(),
        }
    }

    /// The API answered but the expected content path was missing
    pub fn no_content() -> Self {
        Self::new(NO_CONTENT_DESCRIPTION, NOT_AVAILABLE)
    }

    /// The answer was JSON but lacked a description or calorie value
    pub fn unparsed_fields() -> Self {
        Self::new(UNPARSED_FIELDS_DESCRIPTION, NOT_AVAILABLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_type_from_extension() {
        let jpeg = SelectedImage::from_path("/photos/lunch.JPG").unwrap();
        assert_eq!(jpeg.mime_type, "image/jpeg");
        assert_eq!(jpeg.file_name, "lunch.JPG");

        let png = SelectedImage::from_path("dinner.png").unwrap();
        assert_eq!(png.mime_type, "image/png");
    }

    #[test]
    fn test_non_image_is_rejected() {
        let err = SelectedImage::from_path("/photos/recipe.txt").unwrap_err();
        assert_eq!(err, SelectionError::NotAnImage(PathBuf::from("/photos/recipe.txt")));
    }

    #[test]
    fn test_cancelled_picker_is_no_file() {
        assert_eq!(SelectedImage::from_picked(None), Err(SelectionError::NoFile));
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(EstimationResult::no_content().calories, "N/A");
        assert_eq!(
            EstimationResult::unparsed_fields().description,
            "Could not parse description or calories from the JSON response."
        );
    }
}
