use crate::utils::error::{FormError, Result};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Address of a form field, used to bind input controls and to attribute
/// validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldPath {
    Name,
    Email,
    Password,
    /// The techs sequence itself (count errors).
    Techs,
    TechTitle(usize),
    TechKnowledge(usize),
}

impl FieldPath {
    pub fn tech_index(&self) -> Option<usize> {
        match self {
            FieldPath::TechTitle(index) | FieldPath::TechKnowledge(index) => Some(*index),
            _ => None,
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldPath::Name => f.write_str("name"),
            FieldPath::Email => f.write_str("email"),
            FieldPath::Password => f.write_str("password"),
            FieldPath::Techs => f.write_str("techs"),
            FieldPath::TechTitle(index) => write!(f, "techs[{}].title", index),
            FieldPath::TechKnowledge(index) => write!(f, "techs[{}].knowledge", index),
        }
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl FromStr for FieldPath {
    type Err = FormError;

    /// Accepts both `techs[1].title` and the dotted `techs.1.title` form.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || FormError::InvalidFieldPath {
            path: s.to_string(),
        };

        match s {
            "name" => return Ok(FieldPath::Name),
            "email" => return Ok(FieldPath::Email),
            "password" => return Ok(FieldPath::Password),
            "techs" => return Ok(FieldPath::Techs),
            _ => {}
        }

        let rest = s.strip_prefix("techs").ok_or_else(invalid)?;
        let (index, field) = if let Some(bracketed) = rest.strip_prefix('[') {
            let (index, field) = bracketed.split_once(']').ok_or_else(invalid)?;
            let field = field.strip_prefix('.').ok_or_else(invalid)?;
            (index, field)
        } else if let Some(dotted) = rest.strip_prefix('.') {
            dotted.split_once('.').ok_or_else(invalid)?
        } else {
            return Err(invalid());
        };

        if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let index: usize = index.parse().map_err(|_| invalid())?;

        match field {
            "title" => Ok(FieldPath::TechTitle(index)),
            "knowledge" => Ok(FieldPath::TechKnowledge(index)),
            _ => Err(invalid()),
        }
    }
}
