mod app;
mod cli;
mod effects;
mod ui;

pub use app::run_app;
