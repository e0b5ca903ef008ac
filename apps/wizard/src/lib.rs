pub mod config;
pub mod errors;
pub mod gateway;
pub mod history;
pub mod models;
pub mod store;
pub mod wizard;

#[cfg(test)]
mod testing;

pub use config::Config;
pub use errors::{GatewayError, WizardError};
pub use wizard::{StepOutcome, Wizard, WizardStep};
