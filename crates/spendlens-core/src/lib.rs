pub mod commands;
pub mod contracts;
pub mod error;

mod classify;
mod ingest;
mod pipeline;
mod report;

pub use contracts::envelope::{FailureEnvelope, SuccessEnvelope};
pub use error::{CoreError, CoreResult};

pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");
