//! egui rendering: panels with the selectors and the plots.

pub mod panels;
pub mod plot;
