use crate::domain::model::{FieldId, ProfileDraft};
use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\w+([.-]?\w+)*@\w+([.-]?\w+)*(\.\w{2,3})+$").unwrap());

/// Static per-field constraints. Checks run in declaration order and stop at
/// the first failure.
#[derive(Debug, Clone, Copy)]
pub struct ValidationRule {
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub pattern: Option<&'static LazyLock<Regex>>,
    pub reject_future_date: bool,
}

const fn rule(required: bool) -> ValidationRule {
    ValidationRule {
        required,
        min_length: None,
        max_length: None,
        pattern: None,
        reject_future_date: false,
    }
}

pub fn rule_for(field: FieldId) -> ValidationRule {
    match field {
        FieldId::Name => ValidationRule {
            min_length: Some(2),
            max_length: Some(100),
            ..rule(true)
        },
        FieldId::Email => ValidationRule {
            pattern: Some(&EMAIL_PATTERN),
            ..rule(true)
        },
        FieldId::DateOfBirth => ValidationRule {
            reject_future_date: true,
            ..rule(true)
        },
        FieldId::BirthTime => rule(false),
        FieldId::BirthPlace => ValidationRule {
            min_length: Some(2),
            max_length: Some(200),
            ..rule(true)
        },
        FieldId::SunSign => rule(true),
        FieldId::AscendantSign => rule(false),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: FieldId,
    pub message: String,
}

fn violation(field: FieldId, message: String) -> FieldViolation {
    FieldViolation { field, message }
}

/// Checks one field against its rule and reports the first failing check.
/// An empty optional field passes without further checks.
pub fn validate_field(
    field: FieldId,
    raw: &str,
    today: NaiveDate,
) -> std::result::Result<(), FieldViolation> {
    let value = raw.trim();
    let rule = rule_for(field);

    if value.is_empty() {
        if rule.required {
            return Err(violation(field, format!("{} is required", field.label())));
        }
        return Ok(());
    }

    let length = value.chars().count();
    if let Some(min) = rule.min_length {
        if length < min {
            return Err(violation(
                field,
                format!("{} must be at least {} characters", field.label(), min),
            ));
        }
    }
    if let Some(max) = rule.max_length {
        if length > max {
            return Err(violation(
                field,
                format!("{} must be no more than {} characters", field.label(), max),
            ));
        }
    }

    if let Some(pattern) = rule.pattern {
        if !pattern.is_match(value) {
            return Err(violation(
                field,
                format!("Please enter a valid {}", field.label().to_lowercase()),
            ));
        }
    }

    if rule.reject_future_date {
        match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
            Ok(date) if date > today => {
                return Err(violation(
                    field,
                    "Birth date cannot be in the future".to_string(),
                ));
            }
            Ok(_) => {}
            Err(_) => {
                return Err(violation(
                    field,
                    format!("Please enter a valid {}", field.label().to_lowercase()),
                ));
            }
        }
    }

    Ok(())
}

/// Runs the per-field check over every required field and collects every
/// violation, so the surface can show all errors at once.
pub fn validate_form(draft: &ProfileDraft, today: NaiveDate) -> Vec<FieldViolation> {
    FieldId::ALL
        .iter()
        .copied()
        .filter(|field| rule_for(*field).required)
        .filter_map(|field| validate_field(field, draft.raw_value(field), today).err())
        .collect()
}
