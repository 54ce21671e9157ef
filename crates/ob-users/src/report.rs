//! Human-readable confirmations returned to the assistant

use crate::models::UserRecord;

const PLACEHOLDER: &str = "N/A";

/// Name used in confirmations: `"first last"` or `Document {n}`
pub fn label(record: &UserRecord) -> String {
    record
        .full_name()
        .unwrap_or_else(|| format!("Document {}", record.document_number))
}

/// Name used in summaries, with `N/A` standing in for absent parts
fn summary_name(record: &UserRecord) -> String {
    match (&record.first_name, &record.last_name) {
        (None, None) => PLACEHOLDER.to_string(),
        (first, last) => format!(
            "{} {}",
            first.as_deref().unwrap_or(PLACEHOLDER),
            last.as_deref().unwrap_or(PLACEHOLDER)
        )
        .trim()
        .to_string(),
    }
}

fn or_placeholder(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(PLACEHOLDER)
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "Yes" } else { "No" }
}

pub fn created(record: &UserRecord) -> String {
    format!(
        "User {} created successfully with document number {}",
        label(record),
        record.document_number
    )
}

pub fn summary(record: &UserRecord) -> String {
    format!(
        "User found: {}, Phone: {}, Email: {}, Manual Review Required: {}",
        summary_name(record),
        or_placeholder(&record.phone),
        or_placeholder(&record.email),
        yes_no(record.manual_review_required)
    )
}

pub fn updated(record: &UserRecord) -> String {
    format!("User {} updated successfully", label(record))
}

pub fn deleted(record: &UserRecord) -> String {
    format!(
        "User {} with document number {} deleted successfully",
        label(record),
        record.document_number
    )
}

/// One line per record, in the order given
pub fn listing(records: &[UserRecord]) -> String {
    if records.is_empty() {
        return "No users found in the system".to_string();
    }

    let mut output = String::from("Users in system:");
    for record in records {
        output.push('\n');
        output.push_str(&format!(
            "Doc: {}, Name: {}, Phone: {}, Email: {}, Manual Review: {}",
            record.document_number,
            summary_name(record),
            or_placeholder(&record.phone),
            or_placeholder(&record.email),
            yes_no(record.manual_review_required)
        ));
    }
    output
}
