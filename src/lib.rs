pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::config::SchemaConfig;
pub use crate::core::{FormController, FormState, SubmissionSchema, TechKey, TechRow};
pub use crate::domain::{
    ErrorKind, FieldError, FieldPath, RawSubmission, RawTechEntry, Submission, TechEntry,
    ValidationErrors,
};
pub use crate::utils::error::{FormError, Result};
