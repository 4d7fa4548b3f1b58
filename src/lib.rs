pub mod answers;
pub mod config;
pub mod error;
pub mod export;
pub mod locale;
pub mod logging;
pub mod output;
pub mod scoring;
pub mod session;
pub mod stderr_buffer;
pub mod tui;
