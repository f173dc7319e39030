//! Running configured simulations and summarising the results

pub mod report;
pub mod runner;

pub use report::{RunReport, Settlement};
pub use runner::Simulation;
