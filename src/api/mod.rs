/// Inference API module
///
/// - `gemini.rs` - request payload and response interpretation
/// - `transport.rs` - the single outbound HTTP call

pub mod gemini;
pub mod transport;

pub use transport::{HttpTransport, Transport};
