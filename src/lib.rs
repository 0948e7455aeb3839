#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::return_self_not_must_use
)]

pub mod app;
pub mod cli;
pub mod client;
pub mod config;
pub mod context;
pub mod error;
pub mod render;
pub mod request;
pub mod settings;
pub mod ui;
pub mod view;
pub mod widget;

pub use config::Config;
pub use error::{FetchError, Result};
pub use request::{RequestSpec, build};
pub use render::render;
pub use widget::Widget;
