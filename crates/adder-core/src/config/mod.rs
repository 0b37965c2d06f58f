//! Configuration options and the mode-aware value accessor

pub mod option;
pub mod values;

pub use option::{ConfigOption, ConfigValue};
pub use values::{Configuration, Mode};
