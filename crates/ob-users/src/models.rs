//! User record data model

use serde::{Deserialize, Deserializer, Serialize};

/// A user's profile record, keyed by document number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(rename = "documentNumber")]
    pub document_number: i64,
    #[serde(rename = "firstName", default)]
    pub first_name: Option<String>,
    #[serde(rename = "lastName", default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// Locked for human follow-up; the assistant must stop handling this user
    #[serde(default, deserialize_with = "null_as_false")]
    pub manual_review_required: bool,
}

impl UserRecord {
    /// Build a new record from the supplied fields
    pub fn new(document_number: i64, fields: UserFields) -> Self {
        Self {
            document_number,
            first_name: fields.first_name,
            last_name: fields.last_name,
            phone: fields.phone,
            email: fields.email,
            manual_review_required: fields.manual_review_required.unwrap_or(false),
        }
    }

    /// Overlay every supplied field; omitted fields keep their value
    pub fn apply(&mut self, fields: UserFields) {
        if let Some(first_name) = fields.first_name {
            self.first_name = Some(first_name);
        }
        if let Some(last_name) = fields.last_name {
            self.last_name = Some(last_name);
        }
        if let Some(phone) = fields.phone {
            self.phone = Some(phone);
        }
        if let Some(email) = fields.email {
            self.email = Some(email);
        }
        if let Some(review) = fields.manual_review_required {
            self.manual_review_required = review;
        }
    }

    /// `"first last"` with absent parts dropped, or `None` if both are absent
    pub fn full_name(&self) -> Option<String> {
        let name = format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or(""),
            self.last_name.as_deref().unwrap_or("")
        );
        let name = name.trim();
        (!name.is_empty()).then(|| name.to_string())
    }
}

/// Partial set of user fields
///
/// `None` means "not supplied". A supplied empty string or `false` is a real
/// value and is applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UserFields {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub manual_review_required: Option<bool>,
}

impl UserFields {
    pub fn with_first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self
    }

    pub fn with_last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = Some(last_name.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_manual_review(mut self, required: bool) -> Self {
        self.manual_review_required = Some(required);
        self
    }
}

fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_document_shape() {
        let record = UserRecord::new(
            1020304050,
            UserFields::default().with_first_name("Ana").with_phone("+573001234567"),
        );
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(
            value,
            json!({
                "documentNumber": 1020304050,
                "firstName": "Ana",
                "lastName": null,
                "phone": "+573001234567",
                "email": null,
                "manual_review_required": false
            })
        );
    }

    #[test]
    fn test_reads_documents_with_missing_or_null_fields() {
        let record: UserRecord = serde_json::from_value(json!({
            "documentNumber": 7,
            "manual_review_required": null
        }))
        .unwrap();

        assert_eq!(record.document_number, 7);
        assert!(record.first_name.is_none());
        assert!(!record.manual_review_required);
    }

    #[test]
    fn test_apply_only_supplied_fields() {
        let mut record = UserRecord::new(
            7,
            UserFields::default()
                .with_first_name("Ana")
                .with_last_name("Gómez")
                .with_email("ana@example.com"),
        );

        record.apply(UserFields::default().with_last_name("").with_manual_review(true));

        assert_eq!(record.first_name.as_deref(), Some("Ana"));
        assert_eq!(record.last_name.as_deref(), Some(""));
        assert_eq!(record.email.as_deref(), Some("ana@example.com"));
        assert!(record.manual_review_required);

        record.apply(UserFields::default().with_manual_review(false));
        assert!(!record.manual_review_required);
    }

    #[test]
    fn test_full_name() {
        let mut record = UserRecord::new(7, UserFields::default());
        assert_eq!(record.full_name(), None);

        record.last_name = Some("Gómez".to_string());
        assert_eq!(record.full_name().as_deref(), Some("Gómez"));

        record.first_name = Some("Ana".to_string());
        assert_eq!(record.full_name().as_deref(), Some("Ana Gómez"));
    }
}
