pub mod form;
pub mod normalize;
pub mod schema;

pub use crate::utils::error::Result;
pub use form::{FormController, FormState, TechKey, TechRow};
pub use schema::SubmissionSchema;
