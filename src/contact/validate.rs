//! Field checks run before every create and update. All rules run; every
//! failure is collected so the form can show them together.

use lazy_static::lazy_static;
use regex::Regex;

use super::{store::ContactStore, ContactForm};
use crate::ServiceError;

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
    // Indonesian mobile numbers: +62 / 62 / 0 prefix, then 8, then 7-10 digits.
    static ref PHONE_RE: Regex = Regex::new(r"^(\+62|62|0)8[1-9][0-9]{6,9}$").unwrap();
}

/// One failed rule, in form-field terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

/// Pre-edit values of the record being updated. A submitted value equal to
/// its own old value is never treated as a duplicate.
#[derive(Debug, Clone, Copy)]
pub struct PriorValues<'a> {
    pub email: &'a str,
    pub phone: &'a str,
}

pub fn valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn valid_phone(phone: &str) -> bool {
    PHONE_RE.is_match(phone)
}

/// The pure half of validation: `email_dup`/`phone_dup` say whether some
/// stored contact already carries the submitted value.
pub fn check_fields(
    form: &ContactForm,
    prior: Option<PriorValues>,
    email_dup: bool,
    phone_dup: bool,
) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if form.name.trim().is_empty() {
        errors.push(FieldError {
            field: "name",
            message: "Name must not be empty!",
        });
    }

    if !valid_email(&form.email) {
        errors.push(FieldError {
            field: "email",
            message: "Email is not valid!",
        });
    }
    let email_unchanged = prior.map_or(false, |p| form.email == p.email);
    if email_dup && !email_unchanged {
        errors.push(FieldError {
            field: "email",
            message: "E-mail already in use",
        });
    }

    if !valid_phone(&form.phone) {
        errors.push(FieldError {
            field: "phone",
            message: "Phone number is not valid!",
        });
    }
    let phone_unchanged = prior.map_or(false, |p| form.phone == p.phone);
    if phone_dup && !phone_unchanged {
        errors.push(FieldError {
            field: "phone",
            message: "Phone number is already registered!",
        });
    }

    errors
}

/// Probes the store for duplicates, then runs every rule. Returns the
/// collected failures; storage trouble during a probe is the only error.
pub async fn validate_contact(
    store: &ContactStore,
    form: &ContactForm,
    prior: Option<PriorValues<'_>>,
) -> Result<Vec<FieldError>, ServiceError> {
    let email_dup = store.find_one_by("email", &form.email).await?.is_some();
    let phone_dup = store.find_one_by("phone", &form.phone).await?.is_some();

    Ok(check_fields(form, prior, email_dup, phone_dup))
}
