//! Console helpers used by the command line front end

pub mod display;

pub use display::{Color, ColorOutput, GridFormatter};
