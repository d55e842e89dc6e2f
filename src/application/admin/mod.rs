//! Application services for the administrative surface.

pub mod audit;
pub mod chrome;
pub mod settings;
