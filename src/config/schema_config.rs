use crate::utils::error::{FormError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_ordered_bounds, validate_positive_number, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Limits and messages of the sign-up schema. Every field has a default, so
/// an empty TOML document yields the stock form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    pub password_min_len: u32,
    pub techs_min: u32,
    pub knowledge_min: u32,
    pub knowledge_max: u32,
    pub messages: MessageConfig,
}

/// Error texts shown next to the controls. `{min}` and `{max}` are replaced
/// with the configured limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageConfig {
    pub name_required: String,
    pub email_required: String,
    pub email_format: String,
    pub password_min: String,
    pub techs_min: String,
    pub title_required: String,
    pub knowledge_type: String,
    pub knowledge_min: String,
    pub knowledge_max: String,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            password_min_len: 6,
            techs_min: 2,
            knowledge_min: 1,
            knowledge_max: 100,
            messages: MessageConfig::default(),
        }
    }
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            name_required: "O nome é obrigatório.".to_string(),
            email_required: "O e-mail é obrigatório.".to_string(),
            email_format: "Formato de e-mail inválido.".to_string(),
            password_min: "A senha precisa conter no mínimo {min} caracteres.".to_string(),
            techs_min: "Insira pelo menos {min} tecnologias.".to_string(),
            title_required: "O título é obrigatório.".to_string(),
            knowledge_type: "O conhecimento precisa ser um número inteiro.".to_string(),
            knowledge_min: "O número deve ser maior ou igual a {min}.".to_string(),
            knowledge_max: "O número deve ser menor ou igual a {max}.".to_string(),
        }
    }
}

impl MessageConfig {
    fn entries(&self) -> [(&'static str, &str); 9] {
        [
            ("messages.name_required", self.name_required.as_str()),
            ("messages.email_required", self.email_required.as_str()),
            ("messages.email_format", self.email_format.as_str()),
            ("messages.password_min", self.password_min.as_str()),
            ("messages.techs_min", self.techs_min.as_str()),
            ("messages.title_required", self.title_required.as_str()),
            ("messages.knowledge_type", self.knowledge_type.as_str()),
            ("messages.knowledge_min", self.knowledge_min.as_str()),
            ("messages.knowledge_max", self.knowledge_max.as_str()),
        ]
    }
}

impl SchemaConfig {
    /// Loads and validates a configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(FormError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SchemaConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }
}

impl Validate for SchemaConfig {
    fn validate(&self) -> Result<()> {
        validate_positive_number("password_min_len", self.password_min_len, 1)?;
        validate_positive_number("techs_min", self.techs_min, 1)?;
        validate_positive_number("knowledge_min", self.knowledge_min, 1)?;
        validate_ordered_bounds("knowledge_min", self.knowledge_min, self.knowledge_max)?;

        for (field, message) in self.messages.entries() {
            validate_non_empty_string(field, message)?;
        }

        Ok(())
    }
}
