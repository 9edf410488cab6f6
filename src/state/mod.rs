/// State management module
///
/// This module handles all application state, including:
/// - Shared data structures (data.rs)
/// - The form session and its transitions (session.rs)

pub mod data;
pub mod session;
