//! The network topology view: model, builder, interaction state and layout.
//! Everything here is independent of the DOM.

pub mod builder;
pub mod commands;
pub mod icons;
pub mod layout;
pub mod model;
pub mod sync;
pub mod view;

pub use commands::CommandCompletion;
