/// User interface module
///
/// - `panels.rs` - preview, buttons, error banner and results panel

pub mod panels;
