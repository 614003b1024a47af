//! Raw form values and their coercion into a request payload.

use shared::{
    domain::{field_index, FieldDescriptor, FieldKind, FIELDS},
    protocol::{PayloadValue, SubmissionPayload},
};

use crate::error::FormError;

/// Coerces one raw input string according to its field kind.
///
/// Numeric input that does not parse becomes NaN rather than an error.
// TODO: decide with the service owners whether NaN numerics should be refused
// client-side; the service currently answers them with a 400.
pub fn coerce(raw: &str, kind: FieldKind) -> PayloadValue {
    match kind {
        FieldKind::Numeric => PayloadValue::Number(parse_numeric(raw)),
        FieldKind::Text => PayloadValue::Text(raw.to_string()),
    }
}

/// Parses a decimal float; anything unparseable is NaN.
pub fn parse_numeric(raw: &str) -> f64 {
    let trimmed = raw.trim();
    match trimmed {
        "" => f64::NAN,
        "Infinity" | "+Infinity" => f64::INFINITY,
        "-Infinity" => f64::NEG_INFINITY,
        // Only the spelled-out Infinity forms above count; `str::parse` would take "inf" and "nan".
        _ if trimmed
            .chars()
            .any(|c| c.is_ascii_alphabetic() && !matches!(c, 'e' | 'E')) =>
        {
            f64::NAN
        }
        _ => trimmed.parse::<f64>().unwrap_or(f64::NAN),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    values: Vec<String>,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            values: vec![String::new(); FIELDS.len()],
        }
    }
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_field(&mut self, name: &str, raw: impl Into<String>) -> Result<(), FormError> {
        let index = field_index(name).ok_or_else(|| FormError::UnknownField(name.to_string()))?;
        self.values[index] = raw.into();
        Ok(())
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        field_index(name).map(|index| self.values[index].as_str())
    }

    pub fn fields(&self) -> impl Iterator<Item = (&'static FieldDescriptor, &str)> + '_ {
        FIELDS
            .iter()
            .zip(self.values.iter().map(String::as_str))
    }

    /// First descriptor, in schema order, whose raw value is blank.
    pub fn first_missing(&self) -> Option<&'static str> {
        self.fields()
            .find(|(_, raw)| raw.trim().is_empty())
            .map(|(field, _)| field.name)
    }

    pub fn payload(&self) -> SubmissionPayload {
        self.fields()
            .map(|(field, raw)| (field.name, coerce(raw, field.kind)))
            .collect()
    }
}
