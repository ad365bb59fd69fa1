use crate::domain::path::FieldPath;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Empty name, email or title.
    Required,
    /// Email grammar.
    Format,
    /// Length, count or numeric bounds.
    Range,
    /// Knowledge that is not an integer.
    TypeCoercion,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub path: FieldPath,
    pub kind: ErrorKind,
    pub message: String,
}

/// Every failing field of one validation pass, at most one message per path.
#[derive(Error, Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[error("{} field(s) failed validation", .errors.len())]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an error unless the path already has one; the first failing
    /// rule for a path wins.
    pub fn push(&mut self, path: FieldPath, kind: ErrorKind, message: impl Into<String>) {
        if self.get(path).is_some() {
            return;
        }
        self.errors.push(FieldError {
            path,
            kind,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn get(&self, path: FieldPath) -> Option<&FieldError> {
        self.errors.iter().find(|error| error.path == path)
    }

    pub fn message_for(&self, path: FieldPath) -> Option<&str> {
        self.get(path).map(|error| error.message.as_str())
    }

    /// Follows the removal of the tech row at `removed`: its errors go away
    /// and errors of later rows move down one position.
    pub fn remove_tech_index(&mut self, removed: usize) {
        self.errors
            .retain(|error| error.path.tech_index() != Some(removed));

        for error in &mut self.errors {
            error.path = match error.path {
                FieldPath::TechTitle(index) if index > removed => FieldPath::TechTitle(index - 1),
                FieldPath::TechKnowledge(index) if index > removed => {
                    FieldPath::TechKnowledge(index - 1)
                }
                path => path,
            };
        }
    }

    pub fn paths(&self) -> Vec<FieldPath> {
        self.errors.iter().map(|error| error.path).collect()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}
