// Domain layer: form records, field paths and validation reports. No I/O here.

pub mod model;
pub mod path;
pub mod report;

pub use model::{RawSubmission, RawTechEntry, Submission, TechEntry};
pub use path::FieldPath;
pub use report::{ErrorKind, FieldError, ValidationErrors};
