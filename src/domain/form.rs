//! Declarative form schemas shared by every entity form.
//!
//! Each entity describes its fields once as a list of [`FieldDescriptor`]s.
//! [`FormSchema::validate`] interprets those descriptors against raw input and
//! reports problems as `validator::ValidationErrors`, indexed by field key.

use std::borrow::Cow;
use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use validator::{ValidationError, ValidationErrors};

use crate::entities::dates::{parse_input_date, PRESENT};

static PERCENTAGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(100(\.0{1,2})?|\d{1,2}(\.\d{1,2})?)%$").expect("percentage pattern is valid")
});

/// Primitive kind of a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Url,
    /// `0%`..=`100%`, up to two decimal places.
    Percentage,
    /// Calendar date. `allow_ongoing` also admits the `Present` sentinel.
    Date { allow_ongoing: bool },
}

#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub min_length: usize,
    pub placeholder: Option<&'static str>,
}

impl FieldDescriptor {
    pub fn new(key: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            key,
            label,
            kind,
            required: false,
            min_length: 0,
            placeholder: None,
        }
    }

    pub fn text(key: &'static str, label: &'static str) -> Self {
        Self::new(key, label, FieldKind::Text)
    }

    pub fn url(key: &'static str, label: &'static str) -> Self {
        Self::new(key, label, FieldKind::Url)
    }

    pub fn percentage(key: &'static str, label: &'static str) -> Self {
        Self::new(key, label, FieldKind::Percentage)
    }

    pub fn date(key: &'static str, label: &'static str) -> Self {
        Self::new(key, label, FieldKind::Date { allow_ongoing: false })
    }

    pub fn end_date(key: &'static str, label: &'static str) -> Self {
        Self::new(key, label, FieldKind::Date { allow_ongoing: true })
    }

    /// Required fields must hold at least one non-whitespace character.
    pub fn required(mut self) -> Self {
        self.required = true;
        if self.min_length == 0 {
            self.min_length = 1;
        }
        self
    }

    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length;
        self
    }

    pub fn with_placeholder(mut self, placeholder: &'static str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    /// Checks one raw value against this descriptor.
    pub fn check(&self, raw: &str) -> Result<(), ValidationError> {
        let value = raw.trim();

        if value.is_empty() {
            return if self.required {
                Err(field_error("required", format!("{} is required", self.label)))
            } else {
                Ok(())
            };
        }

        if value.chars().count() < self.min_length {
            return Err(field_error(
                "length",
                format!("{} must be at least {} characters", self.label, self.min_length),
            ));
        }

        match self.kind {
            FieldKind::Text => Ok(()),
            FieldKind::Url => validate_url(value),
            FieldKind::Percentage => {
                if PERCENTAGE.is_match(value) {
                    Ok(())
                } else {
                    Err(field_error(
                        "percentage",
                        format!("Invalid {}", self.label.to_lowercase()),
                    ))
                }
            }
            FieldKind::Date { allow_ongoing } => {
                if allow_ongoing && value == PRESENT {
                    Ok(())
                } else if parse_input_date(value).is_some() {
                    Ok(())
                } else {
                    Err(field_error("date", "Pick a valid date"))
                }
            }
        }
    }
}

/// Ordered set of field descriptors for one entity.
#[derive(Debug)]
pub struct FormSchema {
    pub entity: &'static str,
    pub fields: Vec<FieldDescriptor>,
}

impl FormSchema {
    pub fn new(entity: &'static str, fields: Vec<FieldDescriptor>) -> Self {
        Self { entity, fields }
    }

    pub fn field(&self, key: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.key == key)
    }

    /// Validates every field; the error set is keyed by field key.
    pub fn validate(&self, values: &FieldValues) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        for field in &self.fields {
            if let Err(error) = field.check(values.get(field.key)) {
                errors.add(field.key, error);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Raw, untyped form input keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct FieldValues(BTreeMap<String, String>);

impl FieldValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Missing fields read as the empty string.
    pub fn get(&self, key: &str) -> &str {
        self.0.get(key).map(String::as_str).unwrap_or("")
    }

    /// Trimmed copy of a field's value.
    pub fn text(&self, key: &str) -> String {
        self.get(key).trim().to_string()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FieldValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        FieldValues(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// First error message per field, in field-key order.
pub type FieldMessages = BTreeMap<String, String>;

pub fn messages_from(errors: &ValidationErrors) -> FieldMessages {
    errors
        .field_errors()
        .iter()
        .filter_map(|(field, errs)| {
            errs.first().map(|e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "Invalid value".to_string());
                (field.to_string(), message)
            })
        })
        .collect()
}

/// Entity that can be built from, and rendered back into, a form.
pub trait EntityForm: Sized {
    fn schema() -> &'static FormSchema;

    /// Builds the typed record after the schema accepted `values`.
    fn build(values: &FieldValues) -> Result<Self, ValidationErrors>;

    fn to_values(&self) -> FieldValues;

    /// Folds auxiliary inputs (checkboxes and the like) into canonical field values.
    fn normalise(_values: &mut FieldValues) {}

    /// Validated typed record, or the field-indexed errors.
    fn from_values(values: &FieldValues) -> Result<Self, ValidationErrors> {
        Self::schema().validate(values)?;
        Self::build(values)
    }
}

pub fn field_error(code: &'static str, message: impl Into<Cow<'static, str>>) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

/// Single-field error set, for failures found while building a record.
pub fn single_error(
    field: &'static str,
    code: &'static str,
    message: impl Into<Cow<'static, str>>,
) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.add(field, field_error(code, message));
    errors
}

fn validate_url(value: &str) -> Result<(), ValidationError> {
    if value.chars().any(char::is_whitespace) || !value.contains("://") {
        return Err(field_error("url", "Invalid URL"));
    }
    match url::Url::parse(value) {
        Ok(parsed) if parsed.has_host() => Ok(()),
        _ => Err(field_error("url", "Invalid URL")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logo() -> FieldDescriptor {
        FieldDescriptor::url("logo", "Logo").required()
    }

    fn proficiency() -> FieldDescriptor {
        FieldDescriptor::percentage("proficiency", "Proficiency").required()
    }

    #[test]
    fn required_text_rejects_empty_and_whitespace() {
        let name = FieldDescriptor::text("name", "Name").required();
        assert!(name.check("").is_err());
        assert!(name.check("   ").is_err());
        assert!(name.check("Go").is_ok());

        let err = name.check("").unwrap_err();
        assert_eq!(err.message.as_deref(), Some("Name is required"));
    }

    #[test]
    fn optional_text_accepts_empty() {
        assert!(FieldDescriptor::text("notes", "Notes").check("").is_ok());
    }

    #[test]
    fn min_length_is_enforced_on_trimmed_value() {
        let school = FieldDescriptor::text("school", "School").required().with_min_length(3);
        assert!(school.check(" ab ").is_err());
        assert!(school.check("MIT").is_ok());
    }

    #[test]
    fn url_needs_scheme_and_host() {
        assert!(logo().check("https://example.com/a.png").is_ok());
        assert!(logo().check("ftp://files.test/logo.svg").is_ok());
        assert!(logo().check("example.com/a.png").is_err());
        assert!(logo().check("mailto:someone@example.com").is_err());
        assert!(logo().check("https://exa mple.com/a.png").is_err());
        assert!(logo().check("https://").is_err());
    }

    #[test]
    fn percentage_accepts_zero_to_hundred_with_two_decimals() {
        for ok in ["100%", "0%", "55.25%", "7.5%", "100.00%"] {
            assert!(proficiency().check(ok).is_ok(), "{ok} should be accepted");
        }
        for bad in ["101%", "abc", "55", "55.255%", "-1%", "100.01%"] {
            assert!(proficiency().check(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn percentage_error_names_the_field() {
        let grade = FieldDescriptor::percentage("grade", "Grade").required();
        let err = grade.check("A+").unwrap_err();
        assert_eq!(err.message.as_deref(), Some("Invalid grade"));
    }

    #[test]
    fn present_only_allowed_for_end_dates() {
        let start = FieldDescriptor::date("start_date", "Start date").required();
        let end = FieldDescriptor::end_date("end_date", "End date").required();
        assert!(start.check("Present").is_err());
        assert!(end.check("Present").is_ok());
        assert!(start.check("2021-03-15").is_ok());
        assert!(end.check("2021-02-30").is_err());
    }

    #[test]
    fn schema_collects_errors_per_field() {
        let schema = FormSchema::new(
            "skill",
            vec![
                FieldDescriptor::text("name", "Name").required(),
                proficiency(),
                logo(),
            ],
        );
        let values = FieldValues::new()
            .with("name", "")
            .with("proficiency", "80%")
            .with("logo", "nope");

        let errors = schema.validate(&values).unwrap_err();
        let messages = messages_from(&errors);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages["name"], "Name is required");
        assert_eq!(messages["logo"], "Invalid URL");
        assert!(schema.field("proficiency").is_some());
    }
}
