//! Socket listening and connection scheduling

pub mod listener;
