//! Contact field rules and request-body validation.
//!
//! Request bodies arrive as raw JSON. [`validate_new_contact`] checks a body
//! for `POST /contacts` (every required field present), and
//! [`validate_contact_changes`] checks a body for `PUT /contacts/{id}`
//! (any subset of mutable fields). Both report every failing field at once
//! through [`FieldErrors`].

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};
use validator::{ValidateEmail, ValidateLength};

use crate::error::{CoreError, FieldErrors};

// ---------------------------------------------------------------------------
// Field names
// ---------------------------------------------------------------------------

pub const FIELD_FULL_NAME: &str = "full_name";
pub const FIELD_PHONE: &str = "phone";
pub const FIELD_EMAIL: &str = "email";
pub const FIELD_BUSINESS_NAME: &str = "business_name";
pub const FIELD_SERVICE: &str = "service";
pub const FIELD_PROJECT_DETAILS: &str = "project_details";

/// Fields a client may write. Anything else in a body (including `id`,
/// `created_at`, `updated_at`) is rejected as unknown.
pub const WRITABLE_FIELDS: &[&str] = &[
    FIELD_FULL_NAME,
    FIELD_PHONE,
    FIELD_EMAIL,
    FIELD_BUSINESS_NAME,
    FIELD_SERVICE,
    FIELD_PROJECT_DETAILS,
];

// ---------------------------------------------------------------------------
// Length bounds (in characters)
// ---------------------------------------------------------------------------

pub const FULL_NAME_MIN_LEN: u64 = 2;
pub const FULL_NAME_MAX_LEN: u64 = 255;
pub const PHONE_MIN_LEN: u64 = 1;
pub const PHONE_MAX_LEN: u64 = 30;
pub const EMAIL_MAX_LEN: u64 = 255;
pub const BUSINESS_NAME_MIN_LEN: u64 = 1;
pub const BUSINESS_NAME_MAX_LEN: u64 = 255;
pub const PROJECT_DETAILS_MAX_LEN: u64 = 2000;

/// Digits, spaces, dashes and parentheses, with an optional leading `+`.
/// At least one digit is required, so a phone of only separators fails.
const PHONE_PATTERN: &str = r"^\+?[\-\s()]*[0-9][0-9\-\s()]*$";

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PHONE_PATTERN).expect("valid regex"));

/// Email domain: `localhost`, an address literal, or dotted labels ending
/// in a top-level label of at least two characters.
const EMAIL_DOMAIN_PATTERN: &str = r"(?i)^(?:localhost|\[[^\]]+\]|(?:[\p{L}\p{N}](?:[\p{L}\p{N}-]{0,61}[\p{L}\p{N}])?\.)+[\p{L}\p{N}-]+[\p{L}\p{N}])$";

static EMAIL_DOMAIN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_DOMAIN_PATTERN).expect("valid regex"));

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

pub const MSG_REQUIRED: &str = "Missing data for required field.";
pub const MSG_NOT_NULL: &str = "Field may not be null.";
pub const MSG_NOT_STRING: &str = "Not a valid string.";
pub const MSG_UNKNOWN_FIELD: &str = "Unknown field.";
pub const MSG_INVALID_EMAIL: &str = "Not a valid email address.";
pub const MSG_INVALID_PHONE: &str = "Phone contains invalid characters.";

// ---------------------------------------------------------------------------
// Validated payloads
// ---------------------------------------------------------------------------

/// A fully validated contact, ready to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateContact {
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub business_name: String,
    pub service: String,
    pub project_details: Option<String>,
}

/// A validated partial update. `None` leaves the column untouched.
///
/// `project_details` is doubly optional: `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateContact {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub business_name: Option<String>,
    pub service: Option<String>,
    pub project_details: Option<Option<String>>,
}

impl UpdateContact {
    /// True when the update would change nothing.
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.phone.is_none()
            && self.email.is_none()
            && self.business_name.is_none()
            && self.service.is_none()
            && self.project_details.is_none()
    }
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Validate a `POST /contacts` body. Every field except `project_details` is required.
pub fn validate_new_contact(
    body: &Value,
    allowed_services: &[String],
) -> Result<CreateContact, CoreError> {
    let changes = validate_fields(body, allowed_services, Mode::Full)?;

    // Full mode has already reported any missing required field, so every
    // required value is present here.
    match changes {
        UpdateContact {
            full_name: Some(full_name),
            phone: Some(phone),
            email: Some(email),
            business_name: Some(business_name),
            service: Some(service),
            project_details,
        } => Ok(CreateContact {
            full_name,
            phone,
            email,
            business_name,
            service,
            project_details: project_details.flatten(),
        }),
        _ => Err(CoreError::Internal(
            "required contact field missing after validation".to_string(),
        )),
    }
}

/// Validate a `PUT /contacts/{id}` body. Any subset of writable fields is allowed.
pub fn validate_contact_changes(
    body: &Value,
    allowed_services: &[String],
) -> Result<UpdateContact, CoreError> {
    validate_fields(body, allowed_services, Mode::Partial)
}

// ---------------------------------------------------------------------------
// Field-level rules
// ---------------------------------------------------------------------------

/// Check a string against inclusive character-count bounds.
///
/// Returns the failure message, or `None` if the value is within bounds.
pub fn check_length(value: &str, min: Option<u64>, max: Option<u64>) -> Option<String> {
    if value.validate_length(min, max, None) {
        return None;
    }
    Some(match (min, max) {
        (Some(min), Some(max)) => format!("Length must be between {min} and {max}."),
        (None, Some(max)) => format!("Longer than maximum length {max}."),
        (Some(min), None) => format!("Shorter than minimum length {min}."),
        (None, None) => "Invalid length.".to_string(),
    })
}

pub fn check_full_name(value: &str) -> Vec<String> {
    check_length(value, Some(FULL_NAME_MIN_LEN), Some(FULL_NAME_MAX_LEN))
        .into_iter()
        .collect()
}

pub fn check_phone(value: &str) -> Vec<String> {
    if let Some(msg) = check_length(value, Some(PHONE_MIN_LEN), Some(PHONE_MAX_LEN)) {
        return vec![msg];
    }
    if !PHONE_RE.is_match(value) {
        return vec![MSG_INVALID_PHONE.to_string()];
    }
    Vec::new()
}

pub fn check_email(value: &str) -> Vec<String> {
    let mut messages = Vec::new();
    if !value.validate_email() || !has_routable_domain(value) {
        messages.push(MSG_INVALID_EMAIL.to_string());
    }
    if let Some(msg) = check_length(value, None, Some(EMAIL_MAX_LEN)) {
        messages.push(msg);
    }
    messages
}

fn has_routable_domain(email: &str) -> bool {
    email
        .rsplit_once('@')
        .is_some_and(|(_, domain)| EMAIL_DOMAIN_RE.is_match(domain))
}

pub fn check_business_name(value: &str) -> Vec<String> {
    check_length(
        value,
        Some(BUSINESS_NAME_MIN_LEN),
        Some(BUSINESS_NAME_MAX_LEN),
    )
    .into_iter()
    .collect()
}

pub fn check_service(value: &str, allowed_services: &[String]) -> Vec<String> {
    if allowed_services.iter().any(|s| s == value) {
        Vec::new()
    } else {
        vec![format!("Must be one of: {}.", allowed_services.join(", "))]
    }
}

pub fn check_project_details(value: &str) -> Vec<String> {
    check_length(value, None, Some(PROJECT_DETAILS_MAX_LEN))
        .into_iter()
        .collect()
}

// ---------------------------------------------------------------------------
// Body walking
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Required fields must be present.
    Full,
    /// Any subset of fields.
    Partial,
}

/// What a body supplied for one field.
enum Supplied<'a> {
    Absent,
    Null,
    Text(&'a str),
    NotText,
}

fn supplied<'a>(obj: &'a Map<String, Value>, field: &str) -> Supplied<'a> {
    match obj.get(field) {
        None => Supplied::Absent,
        Some(Value::Null) => Supplied::Null,
        Some(Value::String(s)) => Supplied::Text(s),
        Some(_) => Supplied::NotText,
    }
}

/// Interpret the body as a non-empty JSON object.
fn as_object(body: &Value) -> Result<&Map<String, Value>, CoreError> {
    match body {
        Value::Object(obj) if !obj.is_empty() => Ok(obj),
        Value::Object(_) => Err(CoreError::MalformedInput(
            "Request body must not be empty".to_string(),
        )),
        _ => Err(CoreError::MalformedInput(
            "Request body must be a JSON object".to_string(),
        )),
    }
}

/// Read a non-nullable string field and run `check` on it.
fn required_text(
    obj: &Map<String, Value>,
    field: &str,
    mode: Mode,
    errors: &mut FieldErrors,
    check: impl Fn(&str) -> Vec<String>,
) -> Option<String> {
    match supplied(obj, field) {
        Supplied::Absent => {
            if mode == Mode::Full {
                errors.add(field, MSG_REQUIRED);
            }
            None
        }
        Supplied::Null => {
            errors.add(field, MSG_NOT_NULL);
            None
        }
        Supplied::NotText => {
            errors.add(field, MSG_NOT_STRING);
            None
        }
        Supplied::Text(value) => {
            let messages = check(value);
            if messages.is_empty() {
                Some(value.to_string())
            } else {
                for msg in messages {
                    errors.add(field, msg);
                }
                None
            }
        }
    }
}

fn validate_fields(
    body: &Value,
    allowed_services: &[String],
    mode: Mode,
) -> Result<UpdateContact, CoreError> {
    let obj = as_object(body)?;
    let mut errors = FieldErrors::new();

    for key in obj.keys() {
        if !WRITABLE_FIELDS.contains(&key.as_str()) {
            errors.add(key, MSG_UNKNOWN_FIELD);
        }
    }

    let full_name = required_text(obj, FIELD_FULL_NAME, mode, &mut errors, check_full_name);
    let phone = required_text(obj, FIELD_PHONE, mode, &mut errors, check_phone);
    let email = required_text(obj, FIELD_EMAIL, mode, &mut errors, check_email);
    let business_name = required_text(
        obj,
        FIELD_BUSINESS_NAME,
        mode,
        &mut errors,
        check_business_name,
    );
    let service = required_text(obj, FIELD_SERVICE, mode, &mut errors, |v| {
        check_service(v, allowed_services)
    });

    let project_details = match supplied(obj, FIELD_PROJECT_DETAILS) {
        Supplied::Absent => None,
        Supplied::Null => Some(None),
        Supplied::NotText => {
            errors.add(FIELD_PROJECT_DETAILS, MSG_NOT_STRING);
            None
        }
        Supplied::Text(value) => {
            let messages = check_project_details(value);
            if messages.is_empty() {
                Some(Some(value.to_string()))
            } else {
                for msg in messages {
                    errors.add(FIELD_PROJECT_DETAILS, msg);
                }
                None
            }
        }
    };

    let changes = UpdateContact {
        full_name,
        phone,
        email,
        business_name,
        service,
        project_details,
    };
    errors.into_result(changes).map_err(CoreError::from)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
