//! Field shape checks applied before any record is written

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Result, UsersError};
use crate::models::UserRecord;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[\p{L}\p{N}!#$%&'*+/=?^_`{|}~-]+(?:\.[\p{L}\p{N}!#$%&'*+/=?^_`{|}~-]+)*@(?:[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?\.)+[A-Za-z]{2,}$",
    )
    .expect("email regex is valid")
});

/// Validate every present field of a record
pub fn validate_record(record: &UserRecord) -> Result<()> {
    if let Some(phone) = &record.phone {
        validate_phone(phone)?;
    }
    if let Some(email) = &record.email {
        validate_email(email)?;
    }
    Ok(())
}

/// Phone numbers must carry a country code
pub fn validate_phone(phone: &str) -> Result<()> {
    if phone.starts_with('+') {
        Ok(())
    } else {
        Err(UsersError::validation(
            "phone",
            "Phone number must include country code starting with +",
        ))
    }
}

/// Syntactic email check (`local@domain.tld`)
///
/// The local part may contain non-ASCII letters; the domain must be ASCII.
pub fn validate_email(email: &str) -> Result<()> {
    if email.len() <= 254 && EMAIL_RE.is_match(email) {
        Ok(())
    } else {
        Err(UsersError::validation(
            "email",
            format!("'{}' is not a valid email address", email),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserFields;

    #[test]
    fn test_phone_requires_country_code() {
        assert!(validate_phone("+573123456789").is_ok());

        for bad in ["5551234", "", "57 312 345 6789"] {
            let err = validate_phone(bad).unwrap_err();
            assert!(
                matches!(err, UsersError::Validation { field: "phone", .. }),
                "accepted {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_email_syntax() {
        for good in [
            "ana@example.com",
            "ana.gomez+pension@mail.example.co",
            "a_b@x-y.org",
            "josé@correo.co",
            "núñez.maría@example.com",
        ] {
            assert!(validate_email(good).is_ok(), "rejected {:?}", good);
        }
        for bad in ["", "ana", "ana@", "@example.com", "ana@example", "ana..g@example.com", "ana @example.com"] {
            let err = validate_email(bad).unwrap_err();
            assert!(
                matches!(err, UsersError::Validation { field: "email", .. }),
                "accepted {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_absent_fields_are_not_validated() {
        let record = UserRecord::new(1, UserFields::default());
        assert!(validate_record(&record).is_ok());
    }

    #[test]
    fn test_error_message_names_field() {
        let record = UserRecord::new(1, UserFields::default().with_phone("5551234"));
        let err = validate_record(&record).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid phone: Phone number must include country code starting with +"
        );
    }
}
