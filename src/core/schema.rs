use crate::config::SchemaConfig;
use crate::core::normalize::{capitalize_words, normalize_email};
use crate::domain::{
    ErrorKind, FieldPath, RawSubmission, RawTechEntry, Submission, TechEntry, ValidationErrors,
};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use regex::Regex;

// Leading dots and ".." are rejected separately; the regex crate has no lookaround.
const EMAIL_PATTERN: &str =
    r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@(?:[A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$";

/// Declarative rules for a sign-up submission.
///
/// Every field is checked on each pass and all failing paths are reported
/// together. Within one path only the first failing rule is kept. The
/// normalizing transforms run only when nothing failed.
#[derive(Debug, Clone)]
pub struct SubmissionSchema {
    config: SchemaConfig,
    email_pattern: Regex,
}

impl SubmissionSchema {
    pub fn new(config: SchemaConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            email_pattern: Regex::new(EMAIL_PATTERN)?,
        })
    }

    pub fn validate(&self, raw: &RawSubmission) -> std::result::Result<Submission, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        self.check_name(&raw.name, &mut errors);
        self.check_email(&raw.email, &mut errors);
        self.check_password(&raw.password, &mut errors);
        let levels = self.check_techs(&raw.techs, &mut errors);

        if !errors.is_empty() {
            tracing::debug!("Submission rejected: {} field(s) invalid", errors.len());
            return Err(errors);
        }

        let techs = raw
            .techs
            .iter()
            .zip(levels)
            .map(|(tech, knowledge)| TechEntry {
                title: tech.title.clone(),
                knowledge,
            })
            .collect();

        Ok(Submission {
            name: capitalize_words(&raw.name),
            email: normalize_email(&raw.email),
            password: raw.password.clone(),
            techs,
        })
    }

    fn check_name(&self, name: &str, errors: &mut ValidationErrors) {
        if name.trim().is_empty() {
            errors.push(
                FieldPath::Name,
                ErrorKind::Required,
                &self.config.messages.name_required,
            );
        }
    }

    fn check_email(&self, email: &str, errors: &mut ValidationErrors) {
        let email = email.trim();
        if email.is_empty() {
            errors.push(
                FieldPath::Email,
                ErrorKind::Required,
                &self.config.messages.email_required,
            );
        } else if !self.is_email(email) {
            errors.push(
                FieldPath::Email,
                ErrorKind::Format,
                &self.config.messages.email_format,
            );
        }
    }

    fn is_email(&self, email: &str) -> bool {
        !email.starts_with('.') && !email.contains("..") && self.email_pattern.is_match(email)
    }

    fn check_password(&self, password: &str, errors: &mut ValidationErrors) {
        let min = self.config.password_min_len;
        if password.chars().count() < min as usize {
            errors.push(
                FieldPath::Password,
                ErrorKind::Range,
                fill(&self.config.messages.password_min, min, min),
            );
        }
    }

    /// Returns the coerced knowledge level of every entry that passed.
    fn check_techs(&self, techs: &[RawTechEntry], errors: &mut ValidationErrors) -> Vec<u32> {
        let min = self.config.techs_min;
        if techs.len() < min as usize {
            errors.push(
                FieldPath::Techs,
                ErrorKind::Range,
                fill(&self.config.messages.techs_min, min, min),
            );
        }

        let mut levels = Vec::with_capacity(techs.len());
        for (index, tech) in techs.iter().enumerate() {
            if tech.title.trim().is_empty() {
                errors.push(
                    FieldPath::TechTitle(index),
                    ErrorKind::Required,
                    &self.config.messages.title_required,
                );
            }

            match self.coerce_knowledge(&tech.knowledge) {
                Ok(level) => levels.push(level),
                Err((kind, message)) => errors.push(FieldPath::TechKnowledge(index), kind, message),
            }
        }
        levels
    }

    /// Number-control semantics: blank text is zero, anything else must read
    /// as a number. Fractions are rejected after the bounds check.
    fn coerce_knowledge(&self, raw: &str) -> std::result::Result<u32, (ErrorKind, String)> {
        let min = self.config.knowledge_min;
        let max = self.config.knowledge_max;
        let messages = &self.config.messages;

        let text = raw.trim();
        let value = if text.is_empty() {
            0.0
        } else {
            parse_number(text)
        };

        if value.is_nan() {
            return Err((ErrorKind::TypeCoercion, fill(&messages.knowledge_type, min, max)));
        }
        if value < f64::from(min) {
            return Err((ErrorKind::Range, fill(&messages.knowledge_min, min, max)));
        }
        if value > f64::from(max) {
            return Err((ErrorKind::Range, fill(&messages.knowledge_max, min, max)));
        }
        if value.fract() != 0.0 {
            return Err((ErrorKind::TypeCoercion, fill(&messages.knowledge_type, min, max)));
        }

        Ok(value as u32)
    }
}

/// Reads text the way a number control does. Only the exact `Infinity`
/// spelling names an infinite value, and `0x`, `0o` and `0b` prefixes read
/// unsigned integers. Anything else unreadable is NaN.
fn parse_number(text: &str) -> f64 {
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    if unsigned.starts_with(|c: char| c.is_ascii_alphabetic()) && unsigned != "Infinity" {
        return f64::NAN;
    }

    let radix = match text.get(..2) {
        Some("0x") | Some("0X") => Some(16),
        Some("0o") | Some("0O") => Some(8),
        Some("0b") | Some("0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &text[2..];
        if digits.starts_with('+') {
            return f64::NAN;
        }
        return u64::from_str_radix(digits, radix)
            .map(|value| value as f64)
            .unwrap_or(f64::NAN);
    }

    text.parse::<f64>().unwrap_or(f64::NAN)
}

fn fill(template: &str, min: u32, max: u32) -> String {
    template
        .replace("{min}", &min.to_string())
        .replace("{max}", &max.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> SubmissionSchema {
        SubmissionSchema::new(SchemaConfig::default()).unwrap()
    }

    fn valid_raw() -> RawSubmission {
        RawSubmission {
            name: "ana lima".to_string(),
            email: "Ana@Mail.com".to_string(),
            password: "secret1".to_string(),
            techs: vec![RawTechEntry::new("Go", "80"), RawTechEntry::new("Rust", "60")],
        }
    }

    #[test]
    fn test_email_grammar() {
        let schema = schema();
        for email in [
            "user@example.com",
            "first.last+tag@sub.example.org",
            "o'neil_1@mail.co",
            "A-B@X-Y.IO",
        ] {
            assert!(schema.is_email(email), "expected '{}' to be accepted", email);
        }
        for email in [
            "plainaddress",
            ".user@example.com",
            "user.@example.com",
            "us..er@example.com",
            "user@example",
            "user@-example.com",
            "user@example.c",
            "user@exa mple.com",
            "user@@example.com",
            "user'@example.com",
        ] {
            assert!(!schema.is_email(email), "expected '{}' to be rejected", email);
        }
    }

    #[test]
    fn test_knowledge_coercion() {
        let schema = schema();
        assert_eq!(schema.coerce_knowledge("50"), Ok(50));
        assert_eq!(schema.coerce_knowledge(" 1 "), Ok(1));
        assert_eq!(schema.coerce_knowledge("100"), Ok(100));
        assert_eq!(schema.coerce_knowledge("1e2"), Ok(100));

        assert_eq!(schema.coerce_knowledge("0").unwrap_err().0, ErrorKind::Range);
        assert_eq!(schema.coerce_knowledge("").unwrap_err().0, ErrorKind::Range);
        assert_eq!(schema.coerce_knowledge("101").unwrap_err().0, ErrorKind::Range);
        assert_eq!(schema.coerce_knowledge("-5").unwrap_err().0, ErrorKind::Range);
        assert_eq!(schema.coerce_knowledge("abc").unwrap_err().0, ErrorKind::TypeCoercion);
        assert_eq!(schema.coerce_knowledge("NaN").unwrap_err().0, ErrorKind::TypeCoercion);
        assert_eq!(schema.coerce_knowledge("50.5").unwrap_err().0, ErrorKind::TypeCoercion);
    }

    #[test]
    fn test_knowledge_rejects_spelled_out_infinity() {
        let schema = schema();
        for text in ["inf", "INF", "+inf", "infinity", "-Infinity1", "nan"] {
            assert_eq!(
                schema.coerce_knowledge(text).unwrap_err().0,
                ErrorKind::TypeCoercion,
                "expected '{}' to be a type error",
                text
            );
        }
        assert_eq!(schema.coerce_knowledge("Infinity").unwrap_err().0, ErrorKind::Range);
        assert_eq!(schema.coerce_knowledge("-Infinity").unwrap_err().0, ErrorKind::Range);
    }

    #[test]
    fn test_knowledge_reads_prefixed_integers() {
        let schema = schema();
        assert_eq!(schema.coerce_knowledge("0x1A"), Ok(26));
        assert_eq!(schema.coerce_knowledge("0b101"), Ok(5));
        assert_eq!(schema.coerce_knowledge("0o17"), Ok(15));
        assert_eq!(schema.coerce_knowledge("0xZZ").unwrap_err().0, ErrorKind::TypeCoercion);
        assert_eq!(schema.coerce_knowledge("-0x1A").unwrap_err().0, ErrorKind::TypeCoercion);
        assert_eq!(schema.coerce_knowledge("0x+1A").unwrap_err().0, ErrorKind::TypeCoercion);
    }

    #[test]
    fn test_knowledge_messages_carry_bounds() {
        let schema = schema();
        assert_eq!(
            schema.coerce_knowledge("0").unwrap_err().1,
            "O número deve ser maior ou igual a 1."
        );
        assert_eq!(
            schema.coerce_knowledge("101").unwrap_err().1,
            "O número deve ser menor ou igual a 100."
        );
    }

    #[test]
    fn test_collects_every_failing_path() {
        let raw = RawSubmission {
            name: "   ".to_string(),
            email: "not-an-email".to_string(),
            password: "abc".to_string(),
            techs: vec![RawTechEntry::new("", "abc")],
        };

        let errors = schema().validate(&raw).unwrap_err();
        assert_eq!(
            errors.paths(),
            vec![
                FieldPath::Name,
                FieldPath::Email,
                FieldPath::Password,
                FieldPath::Techs,
                FieldPath::TechTitle(0),
                FieldPath::TechKnowledge(0),
            ]
        );
        assert_eq!(errors.get(FieldPath::Email).unwrap().kind, ErrorKind::Format);
        assert_eq!(
            errors.get(FieldPath::TechKnowledge(0)).unwrap().kind,
            ErrorKind::TypeCoercion
        );
    }

    #[test]
    fn test_empty_email_reports_required_only() {
        let mut raw = valid_raw();
        raw.email = "  ".to_string();

        let errors = schema().validate(&raw).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.message_for(FieldPath::Email),
            Some("O e-mail é obrigatório.")
        );
    }

    #[test]
    fn test_password_length_counts_characters() {
        let mut raw = valid_raw();
        raw.password = "çãõéíú".to_string();
        assert!(schema().validate(&raw).is_ok());
    }

    #[test]
    fn test_custom_limits_and_messages() {
        let mut config = SchemaConfig::default();
        config.techs_min = 3;
        config.messages.techs_min = "Need {min} techs".to_string();
        let schema = SubmissionSchema::new(config).unwrap();

        let errors = schema.validate(&valid_raw()).unwrap_err();
        assert_eq!(errors.message_for(FieldPath::Techs), Some("Need 3 techs"));
    }

    #[test]
    fn test_rejects_invalid_config() {
        let mut config = SchemaConfig::default();
        config.knowledge_min = 10;
        config.knowledge_max = 5;
        assert!(SubmissionSchema::new(config).is_err());
    }
}
