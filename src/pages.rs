//! The static pages: home, about, and the catch-all 404.

use actix_web::{get, http::StatusCode, HttpResponse};

use crate::views::{self, AboutTemplate, HomeTemplate, NotFoundTemplate, SampleUser};
use crate::ServiceError;

#[get("/")]
pub async fn home() -> Result<HttpResponse, ServiceError> {
    views::render(&HomeTemplate {
        title: "Home",
        greeting: "Ramadhan",
        users: vec![
            SampleUser {
                name: "Muhammad Ramadhan",
                email: "ramadhannkurniawan@gmail.com",
            },
            SampleUser {
                name: "Andi Budiman",
                email: "andibudiman@gmail.com",
            },
            SampleUser {
                name: "Haris Sampurna",
                email: "harissampurna@gmail.com",
            },
        ],
    })
}

#[get("/about")]
pub async fn about() -> Result<HttpResponse, ServiceError> {
    views::render(&AboutTemplate { title: "About" })
}

/// Default service: anything unrouted renders the 404 page with status 404.
pub async fn not_found() -> Result<HttpResponse, ServiceError> {
    views::render_with_status(StatusCode::NOT_FOUND, &NotFoundTemplate::new())
}
