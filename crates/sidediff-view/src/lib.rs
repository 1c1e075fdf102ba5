//! View model for sidediff.
//!
//! Holds the user's preferences, persists them between runs, and renders
//! aligned rows as two text columns.

pub mod config;
pub mod error;
pub mod prefs;
pub mod render;
pub mod store;
pub mod view;

pub use config::ViewConfig;
pub use error::{ViewError, ViewResult};
pub use prefs::{DiffMode, Preferences, PLACEHOLDER_TEXT};
pub use render::Renderer;
pub use store::StateStore;
pub use view::DiffView;
