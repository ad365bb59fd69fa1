use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Field values as the input controls hold them, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawSubmission {
    pub name: String,
    pub email: String,
    pub password: String,
    pub techs: Vec<RawTechEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawTechEntry {
    pub title: String,
    /// Raw text of the number control; coerced during validation.
    #[serde(deserialize_with = "knowledge_from_input")]
    pub knowledge: String,
}

impl RawTechEntry {
    pub fn new(title: impl Into<String>, knowledge: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            knowledge: knowledge.into(),
        }
    }
}

/// Number controls may hand over either text or a number.
fn knowledge_from_input<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(text) => Ok(text),
        Value::Number(number) => Ok(number.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(de::Error::custom(format!(
            "expected a number or a string for knowledge, got {}",
            other
        ))),
    }
}

/// A validated and normalized submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub name: String,
    pub email: String,
    pub password: String,
    pub techs: Vec<TechEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechEntry {
    pub title: String,
    pub knowledge: u32,
}

impl From<&Submission> for RawSubmission {
    fn from(submission: &Submission) -> Self {
        Self {
            name: submission.name.clone(),
            email: submission.email.clone(),
            password: submission.password.clone(),
            techs: submission
                .techs
                .iter()
                .map(|tech| RawTechEntry::new(tech.title.clone(), tech.knowledge.to_string()))
                .collect(),
        }
    }
}
