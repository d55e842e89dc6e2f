//! Domain layer types and invariants.

pub mod entities;
pub mod icons;
pub mod locale;
pub mod seed;
pub mod settings;
