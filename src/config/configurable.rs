//! The contract a generic configuration manager works against.
//!
//! # Design Decisions
//! - `set` with a value of another type leaves the receiver untouched
//! - `clone_config` never fails: a failed deep copy yields a zero-valued record
//! - `validate` is pure and reports every violation

use std::any::Any;

use crate::config::deep_copy::deep_copy;
use crate::config::schema::{AppConfig, Jobs};
use crate::config::validation::{validate_config, validate_jobs, ValidationError};

pub trait Configurable: Any + Send + Sync {
    /// The record itself, for managers that only hold a trait object.
    fn get(&self) -> &dyn Any;

    /// Replace the contents with `data` if it is the same record type.
    /// Returns whether the replacement happened.
    fn set(&mut self, data: Box<dyn Any>) -> bool;

    /// Independent deep copy.
    fn clone_config(&self) -> Box<dyn Configurable>;

    fn validate(&self) -> Result<(), Vec<ValidationError>>;
}

impl Configurable for AppConfig {
    fn get(&self) -> &dyn Any {
        self
    }

    fn set(&mut self, data: Box<dyn Any>) -> bool {
        match data.downcast::<AppConfig>() {
            Ok(config) => {
                *self = *config;
                true
            }
            Err(_) => {
                tracing::debug!("Ignoring set with a non-AppConfig value");
                false
            }
        }
    }

    fn clone_config(&self) -> Box<dyn Configurable> {
        match deep_copy(self) {
            Ok(copy) => Box::new(copy),
            Err(e) => {
                tracing::warn!(error = %e, "Deep copy failed, returning an empty configuration");
                Box::new(AppConfig::default())
            }
        }
    }

    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        validate_config(self)
    }
}

impl Configurable for Jobs {
    fn get(&self) -> &dyn Any {
        self
    }

    fn set(&mut self, data: Box<dyn Any>) -> bool {
        match data.downcast::<Jobs>() {
            Ok(jobs) => {
                *self = *jobs;
                true
            }
            Err(_) => false,
        }
    }

    fn clone_config(&self) -> Box<dyn Configurable> {
        match deep_copy(self) {
            Ok(copy) => Box::new(copy),
            Err(e) => {
                tracing::warn!(error = %e, "Deep copy failed, returning empty jobs");
                Box::new(Jobs::default())
            }
        }
    }

    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        validate_jobs(self, &mut errors);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
