use serde::Serialize;
use thiserror::Error;

use crate::selection::ProjectSelection;

/// One blocking problem, keyed by the wire field name the form highlights.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

/// Contact-step validation failure. Recoverable by user correction; no
/// other step performs blocking validation.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("contact validation failed: {}", joined_fields(.field_errors))]
pub struct ValidationError {
    pub field_errors: Vec<FieldError>,
}

fn joined_fields(field_errors: &[FieldError]) -> String {
    field_errors.iter().map(|field_error| field_error.field).collect::<Vec<_>>().join(", ")
}

/// Validate the contact step. A missing contact channel is reported as a
/// single `contact` error, not one error per empty field.
pub fn validate_contact(selection: &ProjectSelection) -> Result<(), ValidationError> {
    let mut field_errors = Vec::new();

    if selection.first_name.trim().is_empty() {
        field_errors.push(FieldError { field: "firstName", message: "First name is required" });
    }
    if selection.last_name.trim().is_empty() {
        field_errors.push(FieldError { field: "lastName", message: "Last name is required" });
    }
    if !selection.has_contact_channel() {
        field_errors.push(FieldError {
            field: "contact",
            message: "Either work email or mobile phone is required",
        });
    }

    if field_errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { field_errors })
    }
}

#[cfg(test)]
mod tests {
    use crate::selection::ProjectSelection;

    use super::validate_contact;

    fn contactable() -> ProjectSelection {
        ProjectSelection {
            first_name: "John".to_string(),
            last_name: "Burkhardt".to_string(),
            work_email: "john@example.com".to_string(),
            ..ProjectSelection::default()
        }
    }

    #[test]
    fn complete_contact_info_passes() {
        assert!(validate_contact(&contactable()).is_ok());
    }

    #[test]
    fn phone_alone_satisfies_the_contact_requirement() {
        let selection = ProjectSelection {
            work_email: String::new(),
            mobile_phone: "+1 (555) 123-4567".to_string(),
            ..contactable()
        };
        assert!(validate_contact(&selection).is_ok());
    }

    #[test]
    fn empty_names_are_reported_per_field() {
        let selection = ProjectSelection {
            first_name: "  ".to_string(),
            last_name: String::new(),
            ..contactable()
        };

        let error = validate_contact(&selection).expect_err("blank names must fail");
        let fields: Vec<_> = error.field_errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["firstName", "lastName"]);
    }

    #[test]
    fn missing_both_channels_yields_exactly_one_contact_error() {
        let selection = ProjectSelection {
            work_email: String::new(),
            mobile_phone: " ".to_string(),
            ..contactable()
        };

        let error = validate_contact(&selection).expect_err("no contact channel must fail");
        assert_eq!(error.field_errors.len(), 1);
        assert_eq!(error.field_errors[0].field, "contact");
    }

    #[test]
    fn website_and_description_never_block() {
        let selection = ProjectSelection {
            website: String::new(),
            project_description: String::new(),
            ..contactable()
        };
        assert!(validate_contact(&selection).is_ok());
    }
}
