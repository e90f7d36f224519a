//! Client-side form validation
//!
//! Checks run before anything is sent to the backend. Each form collects
//! at most one error per field into [`FieldErrors`] so the UI can show
//! them inline.

use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

use super::api::ApiError;
use super::models::{Role, UnitId};

/// Minimum username length (characters, after trimming)
pub const MIN_USERNAME_LENGTH: usize = 3;

/// Minimum password length (characters)
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Form fields that can carry an inline error
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Username,
    Password,
    Name,
    Rank,
    Role,
    UnitId,
    Event,
    Items,
}

impl Field {
    pub fn label(&self) -> &'static str {
        match self {
            Field::Username => "Username",
            Field::Password => "Password",
            Field::Name => "Name",
            Field::Rank => "Rank",
            Field::Role => "Role",
            Field::UnitId => "Unit ID",
            Field::Event => "Event",
            Field::Items => "Items",
        }
    }
}

/// Validation error types
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Field is empty
    Required(Field),
    /// Field is shorter than allowed
    TooShort { field: Field, min: usize },
    /// Field must be a positive whole number
    NotNumeric(Field),
    /// Role value is not one of the known roles
    UnknownRole(String),
    /// Report has no sustain, improve or action items
    NoItems,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Required(field) => write!(f, "{} is required", field.label()),
            ValidationError::TooShort { field, min } => {
                write!(f, "{} must be at least {} characters", field.label(), min)
            }
            ValidationError::NotNumeric(field) => {
                write!(f, "{} must be a number", field.label())
            }
            ValidationError::UnknownRole(value) => write!(f, "'{}' is not a valid role", value),
            ValidationError::NoItems => {
                write!(f, "Add at least one sustain, improve or action item")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Per-field errors of one form submission
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors {
    errors: BTreeMap<Field, ValidationError>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error; the first error reported for a field wins
    pub fn add(&mut self, field: Field, error: ValidationError) {
        self.errors.entry(field).or_insert(error);
    }

    /// Record the error of a check result, if any
    pub fn check(&mut self, field: Field, result: Result<(), ValidationError>) {
        if let Err(error) = result {
            self.add(field, error);
        }
    }

    pub fn get(&self, field: Field) -> Option<&ValidationError> {
        self.errors.get(&field)
    }

    pub fn message(&self, field: Field) -> Option<String> {
        self.get(field).map(|e| e.to_string())
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.errors.keys().copied()
    }

    pub fn messages(&self) -> Vec<String> {
        self.errors.values().map(|e| e.to_string()).collect()
    }
}

/// Failure of a form submission: rejected locally or by the backend
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmitError {
    #[error("{} field(s) need attention", .0.len())]
    Invalid(FieldErrors),
    #[error(transparent)]
    Remote(#[from] ApiError),
}

pub fn validate_required(field: Field, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::Required(field))
    } else {
        Ok(())
    }
}

pub fn validate_username(value: &str) -> Result<(), ValidationError> {
    validate_required(Field::Username, value)?;
    if value.trim().chars().count() < MIN_USERNAME_LENGTH {
        return Err(ValidationError::TooShort {
            field: Field::Username,
            min: MIN_USERNAME_LENGTH,
        });
    }
    Ok(())
}

/// Passwords are not trimmed; whitespace counts
pub fn validate_password(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::Required(Field::Password));
    }
    if value.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::TooShort {
            field: Field::Password,
            min: MIN_PASSWORD_LENGTH,
        });
    }
    Ok(())
}

/// Parse a positive numeric id typed into a form
pub fn parse_id(field: Field, value: &str) -> Result<i64, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required(field));
    }
    match trimmed.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ValidationError::NotNumeric(field)),
    }
}

pub fn parse_unit_id(value: &str) -> Result<UnitId, ValidationError> {
    parse_id(Field::UnitId, value)
}

pub fn parse_role(value: &str) -> Result<Role, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required(Field::Role));
    }
    Role::parse(trimmed).ok_or_else(|| ValidationError::UnknownRole(trimmed.to_string()))
}

/// One item per line; blank lines dropped, surrounding whitespace and list bullets trimmed
pub fn parse_items(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| {
            line.trim()
                .trim_start_matches(['-', '*', '•'])
                .trim()
                .to_string()
        })
        .filter(|line| !line.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_rules() {
        assert_eq!(
            validate_username("  "),
            Err(ValidationError::Required(Field::Username))
        );
        assert!(matches!(
            validate_username("ab"),
            Err(ValidationError::TooShort { min: 3, .. })
        ));
        assert!(validate_username(" ab ").is_err());
        assert!(validate_username("abc").is_ok());
    }

    #[test]
    fn test_password_rules() {
        assert_eq!(
            validate_password(""),
            Err(ValidationError::Required(Field::Password))
        );
        assert!(validate_password("12345").is_err());
        assert!(validate_password("123456").is_ok());
        assert!(validate_password("ab cd ").is_ok());
    }

    #[test]
    fn test_parse_unit_id() {
        assert_eq!(parse_unit_id(" 7 "), Ok(7));
        assert_eq!(
            parse_unit_id(""),
            Err(ValidationError::Required(Field::UnitId))
        );
        assert_eq!(
            parse_unit_id("seven"),
            Err(ValidationError::NotNumeric(Field::UnitId))
        );
        assert_eq!(
            parse_unit_id("-3"),
            Err(ValidationError::NotNumeric(Field::UnitId))
        );
    }

    #[test]
    fn test_parse_role() {
        assert_eq!(parse_role("platoon_leader"), Ok(Role::PlatoonLeader));
        assert_eq!(parse_role(""), Err(ValidationError::Required(Field::Role)));
        assert!(matches!(
            parse_role("admiral"),
            Err(ValidationError::UnknownRole(_))
        ));
    }

    #[test]
    fn test_parse_items() {
        let items = parse_items("- Good comms\n\n  * Late SP time  \n•Ammo resupply\n   ");
        assert_eq!(items, vec!["Good comms", "Late SP time", "Ammo resupply"]);
        assert!(parse_items("\n \n").is_empty());
    }

    #[test]
    fn test_field_errors_keep_first() {
        let mut errors = FieldErrors::new();
        errors.add(Field::Name, ValidationError::Required(Field::Name));
        errors.add(
            Field::Name,
            ValidationError::TooShort {
                field: Field::Name,
                min: 2,
            },
        );
        errors.check(Field::Rank, Ok(()));
        errors.check(Field::Password, validate_password("abc"));

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.message(Field::Name).unwrap(), "Name is required");
        assert_eq!(
            errors.message(Field::Password).unwrap(),
            "Password must be at least 6 characters"
        );
        assert!(errors.get(Field::Rank).is_none());
        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            vec![Field::Password, Field::Name]
        );
    }
}
