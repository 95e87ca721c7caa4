//! Presentation layer: egui panels and charts drawn from [`crate::state::AppState`].

pub mod panels;
pub mod plot;
