/// Photo handling module
///
/// This module handles:
/// - Reading the selected photo from disk
/// - Encoding it as base64 for inline API payloads

pub mod encoder;

pub use encoder::encode_image;
