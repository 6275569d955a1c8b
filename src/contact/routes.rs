use actix_session::Session;
use actix_web::{
    delete, get,
    http::{header, StatusCode},
    post, put, web, HttpResponse,
};
use log::*;

use super::{
    store::ContactStore,
    validate::{self, PriorValues},
    ContactForm, DeleteForm, UpdateForm,
};
use crate::flash::{set_flash, take_flash};
use crate::views::{
    self, AddFormTemplate, ContactListTemplate, DetailTemplate, EditFormTemplate, EditFormValues,
    NotFoundTemplate,
};
use crate::ServiceError;

fn redirect_to_list() -> HttpResponse {
    HttpResponse::Found()
        .append_header((header::LOCATION, "/contact"))
        .finish()
}

#[get("/contact")]
pub async fn contact_list(
    store: web::Data<ContactStore>,
    session: Session,
) -> Result<HttpResponse, ServiceError> {
    debug!("servicing contact list request");

    let contacts = store.find_all().await?;
    let message = take_flash(&session);

    views::render(&ContactListTemplate {
        title: "Contact",
        contacts,
        message,
    })
}

#[get("/contact/add")]
pub async fn add_form() -> Result<HttpResponse, ServiceError> {
    views::render(&AddFormTemplate {
        title: "Add New Contact",
        contact: ContactForm::default(),
        errors: Vec::new(),
    })
}

#[post("/contact")]
pub async fn add_contact(
    store: web::Data<ContactStore>,
    session: Session,
    form: web::Form<ContactForm>,
) -> Result<HttpResponse, ServiceError> {
    debug!("servicing add contact request");

    let form = form.into_inner();
    let errors = validate::validate_contact(&store, &form, None).await?;
    if !errors.is_empty() {
        info!("rejecting new contact: {} validation failure(s)", errors.len());
        return views::render_with_status(
            StatusCode::BAD_REQUEST,
            &AddFormTemplate {
                title: "Add New Contact",
                contact: form,
                errors,
            },
        );
    }

    let contact = store.create(&form).await?;
    info!("saved contact {}", contact.id_hex());

    set_flash(&session, "Contact saved successfully!");
    Ok(redirect_to_list())
}

/// Renders the edit form. An unknown id renders a blank form rather than a
/// 404 page.
#[get("/contact/edit/{id}")]
pub async fn edit_form(
    store: web::Data<ContactStore>,
    id: web::Path<String>,
) -> Result<HttpResponse, ServiceError> {
    let contact = store.find_by_id(&id).await?;
    let values = contact
        .as_ref()
        .map(EditFormValues::from)
        .unwrap_or_default();

    views::render(&EditFormTemplate {
        title: "Edit Contact",
        contact: values,
        errors: Vec::new(),
    })
}

#[put("/contact/update")]
pub async fn update_contact(
    store: web::Data<ContactStore>,
    session: Session,
    form: web::Form<UpdateForm>,
) -> Result<HttpResponse, ServiceError> {
    debug!("servicing update contact request");

    let form = form.into_inner();
    let fields = form.fields();
    let prior = PriorValues {
        email: &form.old_email,
        phone: &form.old_phone,
    };
    let errors = validate::validate_contact(&store, &fields, Some(prior)).await?;
    if !errors.is_empty() {
        info!(
            "rejecting edit of contact {}: {} validation failure(s)",
            form.id,
            errors.len()
        );
        return views::render_with_status(
            StatusCode::BAD_REQUEST,
            &EditFormTemplate {
                title: "Edit Contact",
                contact: EditFormValues::from(&form),
                errors,
            },
        );
    }

    let contact = store.update_by_id(&form.id, &fields).await?;
    info!("updated contact {}", contact.id_hex());

    set_flash(&session, "Contact updated successfully!");
    Ok(redirect_to_list())
}

#[delete("/contact")]
pub async fn delete_contact(
    store: web::Data<ContactStore>,
    session: Session,
    form: web::Form<DeleteForm>,
) -> Result<HttpResponse, ServiceError> {
    debug!("servicing delete contact request");

    match store.delete_by_id(&form.id).await? {
        None => views::render_with_status(StatusCode::NOT_FOUND, &NotFoundTemplate::new()),
        Some(contact) => {
            info!("removed contact {}", contact.id_hex());
            set_flash(&session, "Contact deleted successfully!");
            Ok(redirect_to_list())
        }
    }
}

#[get("/contact/{id}")]
pub async fn contact_detail(
    store: web::Data<ContactStore>,
    id: web::Path<String>,
) -> Result<HttpResponse, ServiceError> {
    let contact = store.find_by_id(&id).await?;

    views::render(&DetailTemplate {
        title: "Detail Contact",
        contact,
    })
}
