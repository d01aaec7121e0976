use std::collections::BTreeMap;

use crate::field::{Field, RawFormInput};
use crate::measurement::ValidatedMeasurement;
use crate::record::ContactInfo;

const MIN_PHONE_DIGITS: usize = 7;

/// Group of fields validated together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Measurement,
    Contact,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("required")]
    Required,
    #[error("must be a valid positive number")]
    InvalidNumber,
    #[error("invalid phone number")]
    InvalidPhone,
}

/// Validation errors keyed by the offending field. Empty means valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorMap(BTreeMap<Field, FieldError>);

impl ErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: Field) -> Option<FieldError> {
        self.0.get(&field).copied()
    }

    pub fn insert(&mut self, field: Field, error: FieldError) {
        self.0.insert(field, error);
    }

    /// Drops the error of a field, typically because its value changed.
    pub fn clear(&mut self, field: Field) -> Option<FieldError> {
        self.0.remove(&field)
    }

    /// Overwrites errors for fields present in `other`, leaving the rest
    /// untouched.
    pub fn merge(&mut self, other: ErrorMap) {
        self.0.extend(other.0);
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, FieldError)> + '_ {
        self.0.iter().map(|(field, error)| (*field, *error))
    }

    /// Sentence shown under the field in the form.
    pub fn message(&self, field: Field) -> Option<String> {
        self.get(field).map(|error| match error {
            FieldError::Required => format!("{} is required.", field.label()),
            FieldError::InvalidNumber => {
                format!("{} must be a valid positive number.", field.label())
            }
            FieldError::InvalidPhone => "Enter a valid phone number.".to_owned(),
        })
    }
}

pub fn validate(stages: &[Stage], input: &RawFormInput) -> ErrorMap {
    let mut errors = ErrorMap::new();
    if stages.contains(&Stage::Measurement) {
        if let Err(e) = parse_age(&input.age) {
            errors.insert(Field::Age, e);
        }
        if let Err(e) = parse_positive(&input.weight) {
            errors.insert(Field::Weight, e);
        }
        if let Err(e) = parse_positive(&input.height) {
            errors.insert(Field::Height, e);
        }
    }
    if stages.contains(&Stage::Contact) {
        if let Err(e) = check_name(&input.name) {
            errors.insert(Field::Name, e);
        }
        if let Err(e) = normalize_phone(&input.phone) {
            errors.insert(Field::Phone, e);
        }
    }
    errors
}

pub fn parse_measurement(input: &RawFormInput) -> Result<ValidatedMeasurement, ErrorMap> {
    match (
        parse_age(&input.age),
        parse_positive(&input.weight),
        parse_positive(&input.height),
    ) {
        (Ok(age), Ok(weight_kg), Ok(height_cm)) => Ok(ValidatedMeasurement {
            age,
            weight_kg,
            height_cm,
        }),
        _ => Err(validate(&[Stage::Measurement], input)),
    }
}

pub fn parse_contact(input: &RawFormInput) -> Result<ContactInfo, ErrorMap> {
    match (check_name(&input.name), normalize_phone(&input.phone)) {
        (Ok(name), Ok(phone)) => Ok(ContactInfo {
            name: name.to_owned(),
            phone,
        }),
        _ => Err(validate(&[Stage::Contact], input)),
    }
}

fn parse_age(raw: &str) -> Result<u32, FieldError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(FieldError::Required);
    }
    // Only the leading integer counts: "30.5" is 30, "0.5" is 0.
    let unsigned = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    let digits = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    let leading = &raw[..raw.len() - unsigned.len() + digits];
    match leading.parse::<i64>() {
        Ok(age) if age > 0 => u32::try_from(age).map_err(|_| FieldError::InvalidNumber),
        _ => Err(FieldError::InvalidNumber),
    }
}

fn parse_positive(raw: &str) -> Result<f64, FieldError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(FieldError::Required);
    }
    match raw.parse::<f64>() {
        Ok(x) if x.is_finite() && x > 0.0 => Ok(x),
        _ => Err(FieldError::InvalidNumber),
    }
}

fn check_name(raw: &str) -> Result<&str, FieldError> {
    match raw.trim() {
        "" => Err(FieldError::Required),
        name => Ok(name),
    }
}

// Only whitespace is stripped; any other separator makes the number invalid.
fn normalize_phone(raw: &str) -> Result<String, FieldError> {
    if raw.trim().is_empty() {
        return Err(FieldError::Required);
    }
    let phone: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    if phone.len() >= MIN_PHONE_DIGITS && phone.chars().all(|c| c.is_ascii_digit()) {
        Ok(phone)
    } else {
        Err(FieldError::InvalidPhone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str, phone: &str, age: &str, weight: &str, height: &str) -> RawFormInput {
        RawFormInput {
            name: name.to_owned(),
            phone: phone.to_owned(),
            age: age.to_owned(),
            weight: weight.to_owned(),
            height: height.to_owned(),
        }
    }

    #[test]
    fn measurement_pass() {
        let test_data = [
            (("30", "70.5", "165"), vec![]),
            (
                ("", "", ""),
                vec![
                    (Field::Age, FieldError::Required),
                    (Field::Weight, FieldError::Required),
                    (Field::Height, FieldError::Required),
                ],
            ),
            (
                ("0", "-70", "abc"),
                vec![
                    (Field::Age, FieldError::InvalidNumber),
                    (Field::Weight, FieldError::InvalidNumber),
                    (Field::Height, FieldError::InvalidNumber),
                ],
            ),
            (("30.5", "70", "165"), vec![]),
            (("0.5", "70", "165"), vec![(Field::Age, FieldError::InvalidNumber)]),
            (("-30", "70", "165"), vec![(Field::Age, FieldError::InvalidNumber)]),
            (("+", "70", "165"), vec![(Field::Age, FieldError::InvalidNumber)]),
            (("x30", "70", "165"), vec![(Field::Age, FieldError::InvalidNumber)]),
            (("30", "inf", "NaN"), vec![
                (Field::Weight, FieldError::InvalidNumber),
                (Field::Height, FieldError::InvalidNumber),
            ]),
            ((" 30 ", " 70.5", "165 "), vec![]),
            (("  ", "70", "165"), vec![(Field::Age, FieldError::Required)]),
        ];

        for (i, ((age, weight, height), expected_errors)) in test_data.into_iter().enumerate() {
            let errors = validate(&[Stage::Measurement], &input("", "", age, weight, height));
            assert_eq!(
                errors.iter().collect::<Vec<_>>(),
                expected_errors,
                "Test case #{}",
                i
            );
        }
    }

    #[test]
    fn contact_pass() {
        let test_data = [
            (("Juan Pérez", "51987654321"), vec![]),
            (("", "51987654321"), vec![(Field::Name, FieldError::Required)]),
            (("   ", "  "), vec![
                (Field::Name, FieldError::Required),
                (Field::Phone, FieldError::Required),
            ]),
            (("Ana", "123-45"), vec![(Field::Phone, FieldError::InvalidPhone)]),
            (("Ana", "123456"), vec![(Field::Phone, FieldError::InvalidPhone)]),
            (("Ana", "123-4567"), vec![(Field::Phone, FieldError::InvalidPhone)]),
            (("Ana", "+51987654321"), vec![(Field::Phone, FieldError::InvalidPhone)]),
            (("Ana", "987 654 321"), vec![]),
            (("Ana", "1234567"), vec![]),
        ];

        for (i, ((name, phone), expected_errors)) in test_data.into_iter().enumerate() {
            let errors = validate(&[Stage::Contact], &input(name, phone, "", "", ""));
            assert_eq!(
                errors.iter().collect::<Vec<_>>(),
                expected_errors,
                "Test case #{}",
                i
            );
        }
    }

    #[test]
    fn age_keeps_leading_integer() {
        let test_data = [("30", 30), ("30.5", 30), ("+41", 41), ("7 years", 7), (" 65.9 ", 65)];

        for (i, (raw, expected_age)) in test_data.into_iter().enumerate() {
            assert_eq!(parse_age(raw), Ok(expected_age), "Test case #{}", i);
        }
    }

    #[test]
    fn stages_are_independent() {
        let raw = input("", "", "", "", "");
        assert_eq!(validate(&[Stage::Measurement], &raw).len(), 3);
        assert_eq!(validate(&[Stage::Contact], &raw).len(), 2);
        assert_eq!(validate(&[Stage::Measurement, Stage::Contact], &raw).len(), 5);
        assert!(validate(&[], &raw).is_empty());
    }

    #[test]
    fn validation_is_idempotent() {
        let raw = input("", "12", "x", "70", "");
        let first = validate(&[Stage::Measurement, Stage::Contact], &raw);
        let second = validate(&[Stage::Measurement, Stage::Contact], &raw);
        assert_eq!(first, second);
    }

    #[test]
    fn merge_preserves_untouched_fields() {
        let mut errors = validate(&[Stage::Contact], &input("", "1", "", "", ""));
        errors.merge(validate(&[Stage::Measurement], &input("", "", "30", "", "165")));

        assert_eq!(errors.get(Field::Name), Some(FieldError::Required));
        assert_eq!(errors.get(Field::Phone), Some(FieldError::InvalidPhone));
        assert_eq!(errors.get(Field::Weight), Some(FieldError::Required));
        assert_eq!(errors.get(Field::Age), None);

        assert_eq!(errors.clear(Field::Name), Some(FieldError::Required));
        assert_eq!(errors.get(Field::Name), None);
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn parse_measurement_and_contact() {
        let raw = input("  Juan Pérez ", "987 654 321", "30", "70.5", "165");
        assert_eq!(
            parse_measurement(&raw),
            Ok(ValidatedMeasurement {
                age: 30,
                weight_kg: 70.5,
                height_cm: 165.0,
            })
        );
        assert_eq!(
            parse_contact(&raw),
            Ok(ContactInfo {
                name: "Juan Pérez".to_owned(),
                phone: "987654321".to_owned(),
            })
        );

        let errors = parse_measurement(&input("", "", "30", "0", "165")).unwrap_err();
        assert_eq!(
            errors.iter().collect::<Vec<_>>(),
            vec![(Field::Weight, FieldError::InvalidNumber)]
        );
    }

    #[test]
    fn messages() {
        let errors = validate(
            &[Stage::Measurement, Stage::Contact],
            &input("", "12", "-1", "", "170"),
        );
        assert_eq!(errors.message(Field::Name).as_deref(), Some("Name is required."));
        assert_eq!(
            errors.message(Field::Phone).as_deref(),
            Some("Enter a valid phone number.")
        );
        assert_eq!(
            errors.message(Field::Age).as_deref(),
            Some("Age must be a valid positive number.")
        );
        assert_eq!(errors.message(Field::Height), None);
        assert_eq!(FieldError::InvalidPhone.to_string(), "invalid phone number");
    }
}
