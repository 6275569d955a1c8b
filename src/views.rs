//! Template structs for every page. Rendering itself is askama's job; this
//! module only shapes handler results into template context.

use actix_web::{http::StatusCode, HttpResponse};
use askama::Template;

use crate::contact::{validate::FieldError, Contact, ContactForm, UpdateForm};
use crate::ServiceError;

pub fn render<T: Template>(template: &T) -> Result<HttpResponse, ServiceError> {
    render_with_status(StatusCode::OK, template)
}

pub fn render_with_status<T: Template>(
    status: StatusCode,
    template: &T,
) -> Result<HttpResponse, ServiceError> {
    Ok(HttpResponse::build(status)
        .content_type("text/html; charset=utf-8")
        .body(template.render()?))
}

/// A hardcoded entry on the home page.
pub struct SampleUser {
    pub name: &'static str,
    pub email: &'static str,
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct HomeTemplate {
    pub title: &'static str,
    pub greeting: &'static str,
    pub users: Vec<SampleUser>,
}

#[derive(Template)]
#[template(path = "about.html")]
pub struct AboutTemplate {
    pub title: &'static str,
}

#[derive(Template)]
#[template(path = "contact.html")]
pub struct ContactListTemplate {
    pub title: &'static str,
    pub contacts: Vec<Contact>,
    pub message: Option<String>,
}

#[derive(Template)]
#[template(path = "add.html")]
pub struct AddFormTemplate {
    pub title: &'static str,
    pub contact: ContactForm,
    pub errors: Vec<FieldError>,
}

/// What the edit form needs to round-trip: the editable fields plus the
/// record id and the pre-edit email/phone for the duplicate exclusion.
#[derive(Debug, Default, Clone)]
pub struct EditFormValues {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub old_email: String,
    pub old_phone: String,
}

impl From<&Contact> for EditFormValues {
    fn from(contact: &Contact) -> Self {
        Self {
            id: contact.id_hex(),
            name: contact.name.clone(),
            email: contact.email.clone(),
            phone: contact.phone.clone(),
            old_email: contact.email.clone(),
            old_phone: contact.phone.clone(),
        }
    }
}

impl From<&UpdateForm> for EditFormValues {
    fn from(form: &UpdateForm) -> Self {
        Self {
            id: form.id.clone(),
            name: form.name.clone(),
            email: form.email.clone(),
            phone: form.phone.clone(),
            old_email: form.old_email.clone(),
            old_phone: form.old_phone.clone(),
        }
    }
}

#[derive(Template)]
#[template(path = "edit.html")]
pub struct EditFormTemplate {
    pub title: &'static str,
    pub contact: EditFormValues,
    pub errors: Vec<FieldError>,
}

#[derive(Template)]
#[template(path = "detail.html")]
pub struct DetailTemplate {
    pub title: &'static str,
    pub contact: Option<Contact>,
}

#[derive(Template)]
#[template(path = "404.html")]
pub struct NotFoundTemplate {
    pub title: &'static str,
}

impl NotFoundTemplate {
    pub fn new() -> Self {
        Self {
            title: "Request Not Found",
        }
    }
}

impl Default for NotFoundTemplate {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use bson::oid::ObjectId;
    use chrono::Utc;

    fn ada() -> Contact {
        Contact {
            id: Some(ObjectId::new()),
            name: "Ada".to_string(),
            email: "ada@x.com".to_string(),
            phone: "081234567890".to_string(),
            inserted_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn list_shows_each_contact() {
        let contact = ada();
        let id = contact.id_hex();
        let html = ContactListTemplate {
            title: "Contact",
            contacts: vec![contact],
            message: Some("Contact saved successfully!".to_string()),
        }
        .render()
        .expect("render failed");

        assert!(html.contains("Ada"));
        assert!(html.contains("ada@x.com"));
        assert!(html.contains(&format!("/contact/{}", id)));
        assert!(html.contains(&format!("/contact/edit/{}", id)));
        assert!(html.contains("Contact saved successfully!"));
    }

    #[test]
    fn list_without_flash_has_no_alert() {
        let html = ContactListTemplate {
            title: "Contact",
            contacts: Vec::new(),
            message: None,
        }
        .render()
        .expect("render failed");

        assert!(!html.contains("class=\"alert\""));
    }

    #[test]
    fn add_form_echoes_errors_and_input() {
        let html = AddFormTemplate {
            title: "Add New Contact",
            contact: ContactForm {
                name: "Ada".to_string(),
                email: "taken@x.com".to_string(),
                phone: "081234567890".to_string(),
            },
            errors: vec![FieldError {
                field: "email",
                message: "E-mail already in use",
            }],
        }
        .render()
        .expect("render failed");

        assert!(html.contains("E-mail already in use"));
        assert!(html.contains("value=\"taken@x.com\""));
        assert!(html.contains("value=\"Ada\""));
    }

    #[test]
    fn edit_form_round_trips_prior_values() {
        let contact = ada();
        let html = EditFormTemplate {
            title: "Edit Contact",
            contact: EditFormValues::from(&contact),
            errors: Vec::new(),
        }
        .render()
        .expect("render failed");

        assert!(html.contains("name=\"oldEmail\" value=\"ada@x.com\""));
        assert!(html.contains("name=\"oldPhone\" value=\"081234567890\""));
        assert!(html.contains("/contact/update?_method=PUT"));
    }

    #[test]
    fn detail_handles_a_missing_contact() {
        let html = DetailTemplate {
            title: "Detail Contact",
            contact: None,
        }
        .render()
        .expect("render failed");

        assert!(html.contains("Contact not found"));
    }

    #[test]
    fn not_found_page_names_itself() {
        let html = NotFoundTemplate::new().render().expect("render failed");
        assert!(html.contains("Request Not Found"));
    }
}
