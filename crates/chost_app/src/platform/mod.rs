mod app;
mod logging;
mod notices;
mod persistence;
mod prompt;

pub use app::run_app;
