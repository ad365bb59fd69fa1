use crate::config::SchemaConfig;
use crate::core::schema::SubmissionSchema;
use crate::domain::{FieldPath, RawSubmission, RawTechEntry, Submission, ValidationErrors};
use crate::utils::error::{FormError, Result};
use serde::Serialize;
use std::fmt;

/// Identity of a tech row, assigned on append and never reused by the same
/// form. Independent of the row's position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TechKey(u64);

impl TechKey {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TechKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One editable technology row, holding raw control values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TechRow {
    key: TechKey,
    pub title: String,
    pub knowledge: String,
}

impl TechRow {
    pub fn key(&self) -> TechKey {
        self.key
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    /// Nothing submitted yet, or the last submit failed, or rows changed since.
    Editing,
    SubmittedValid,
}

/// In-memory state of the sign-up screen.
#[derive(Debug, Clone)]
pub struct FormController {
    schema: SubmissionSchema,
    name: String,
    email: String,
    password: String,
    techs: Vec<TechRow>,
    next_key: u64,
    errors: ValidationErrors,
    output: Option<Submission>,
    state: FormState,
}

impl FormController {
    pub fn new(schema: SubmissionSchema) -> Self {
        Self {
            schema,
            name: String::new(),
            email: String::new(),
            password: String::new(),
            techs: Vec::new(),
            next_key: 0,
            errors: ValidationErrors::new(),
            output: None,
            state: FormState::Editing,
        }
    }

    pub fn with_config(config: SchemaConfig) -> Result<Self> {
        Ok(Self::new(SubmissionSchema::new(config)?))
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn set_name(&mut self, value: impl Into<String>) {
        self.name = value.into();
    }

    pub fn set_email(&mut self, value: impl Into<String>) {
        self.email = value.into();
    }

    pub fn set_password(&mut self, value: impl Into<String>) {
        self.password = value.into();
    }

    pub fn set_tech_title(&mut self, key: TechKey, value: impl Into<String>) -> Result<()> {
        self.row_mut(key)?.title = value.into();
        Ok(())
    }

    pub fn set_tech_knowledge(&mut self, key: TechKey, value: impl Into<String>) -> Result<()> {
        self.row_mut(key)?.knowledge = value.into();
        Ok(())
    }

    /// Binds a control by its field path, e.g. `techs[1].knowledge`.
    pub fn set_field(&mut self, path: &str, value: impl Into<String>) -> Result<()> {
        let field: FieldPath = path.parse()?;
        let value = value.into();
        let unbound = || FormError::InvalidFieldPath {
            path: path.to_string(),
        };

        match field {
            FieldPath::Name => self.name = value,
            FieldPath::Email => self.email = value,
            FieldPath::Password => self.password = value,
            FieldPath::Techs => return Err(unbound()),
            FieldPath::TechTitle(index) => {
                self.techs.get_mut(index).ok_or_else(unbound)?.title = value
            }
            FieldPath::TechKnowledge(index) => {
                self.techs.get_mut(index).ok_or_else(unbound)?.knowledge = value
            }
        }
        Ok(())
    }

    /// Appends a blank row with a zero knowledge level.
    pub fn append_tech(&mut self) -> TechKey {
        let key = TechKey(self.next_key);
        self.next_key += 1;
        self.techs.push(TechRow {
            key,
            title: String::new(),
            knowledge: "0".to_string(),
        });
        self.state = FormState::Editing;
        tracing::debug!("Appended tech row {} ({} rows)", key, self.techs.len());
        key
    }

    /// Removes the row with `key`. Remaining rows keep their keys, values,
    /// relative order and errors from the last submit.
    pub fn remove_tech(&mut self, key: TechKey) -> Result<TechRow> {
        let index = self
            .row_index(key)
            .ok_or(FormError::UnknownTech { key: key.value() })?;
        let row = self.techs.remove(index);
        self.errors.remove_tech_index(index);
        self.state = FormState::Editing;
        tracing::debug!("Removed tech row {} ({} rows left)", key, self.techs.len());
        Ok(row)
    }

    pub fn techs(&self) -> &[TechRow] {
        &self.techs
    }

    pub fn row_index(&self, key: TechKey) -> Option<usize> {
        self.techs.iter().position(|row| row.key == key)
    }

    fn row_mut(&mut self, key: TechKey) -> Result<&mut TechRow> {
        self.techs
            .iter_mut()
            .find(|row| row.key == key)
            .ok_or(FormError::UnknownTech { key: key.value() })
    }

    /// Current control values as a raw submission.
    pub fn draft(&self) -> RawSubmission {
        RawSubmission {
            name: self.name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            techs: self
                .techs
                .iter()
                .map(|row| RawTechEntry::new(row.title.clone(), row.knowledge.clone()))
                .collect(),
        }
    }

    /// Validates the current values. On success the normalized record
    /// replaces the previous output and errors are cleared; on failure the
    /// errors replace the previous ones and the output is left alone.
    pub fn submit(&mut self) -> std::result::Result<&Submission, &ValidationErrors> {
        match self.schema.validate(&self.draft()) {
            Ok(submission) => {
                self.errors = ValidationErrors::new();
                self.state = FormState::SubmittedValid;
                tracing::info!(
                    "Submission accepted with {} technologies",
                    submission.techs.len()
                );
                Ok(self.output.insert(submission))
            }
            Err(errors) => {
                tracing::warn!("Submission rejected: {}", errors);
                for error in &errors {
                    tracing::debug!("{}: {}", error.path, error.message);
                }
                self.errors = errors;
                self.state = FormState::Editing;
                Err(&self.errors)
            }
        }
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn error_for(&self, path: FieldPath) -> Option<&str> {
        self.errors.message_for(path)
    }

    pub fn output(&self) -> Option<&Submission> {
        self.output.as_ref()
    }

    /// The last accepted submission as 2-space indented JSON.
    pub fn rendered_output(&self) -> Result<Option<String>> {
        self.output
            .as_ref()
            .map(serde_json::to_string_pretty)
            .transpose()
            .map_err(FormError::from)
    }
}
