pub mod composers;
pub mod error;
pub mod ports;
pub mod services;
pub mod transform;
pub mod validation;

pub use error::{ApplicationError, ApplicationResult};
