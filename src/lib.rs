//! # Request Flow
//! The contact book serves plain HTML: every page is rendered on the server and
//! every mutation arrives as an urlencoded form post.
//!
//! ## Reading
//! `GET /contact` lists everything in the store; `GET /contact/{id}` and
//! `GET /contact/edit/{id}` fetch a single record.
//!
//! ## Writing
//! `POST /contact` creates, `PUT /contact/update` edits and `DELETE /contact`
//! removes a record. The latter two are ordinary form posts carrying
//! `?_method=PUT` / `?_method=DELETE`, rewritten by [`middlewares::MethodOverride`]
//! before routing. Writes run the validation layer first and re-render the
//! originating form with the collected errors when it fails.

#![forbid(unsafe_code)]

use actix_web::{error::ResponseError, HttpResponse};
use log::*;
use std::fmt;

pub mod contact;
pub mod data;
pub mod flash;
pub mod middlewares;
pub mod pages;
pub mod views;

#[derive(Debug)]
/// The contact book was unable to service you, for any of these reasons.
pub enum ServiceError {
    /// Something went wrong on our end.
    InternalServerError,
    /// The request you sent us was invalid or not usable for any number of reasons.
    BadRequest(String),
    /// We don't know anything about what you requested.
    NoData,
}

impl ServiceError {
    /// A shortcut for making a `ServiceError::BadRequest`.
    /// ```
    /// use contact_book::ServiceError;
    ///
    /// let br = ServiceError::bad_request("that form is full of holes");
    /// let is_br = matches!(br, ServiceError::BadRequest(_));
    /// assert!(is_br, "ServiceError::bad_request() should always return a BadRequest variant");
    /// ```
    pub fn bad_request<T: ToString + ?Sized>(t: &T) -> Self {
        Self::BadRequest(t.to_string())
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use ServiceError::*;

        match self {
            InternalServerError => write!(f, "Internal Server Error"),
            BadRequest(s) => write!(f, "Bad Request: {}", s),
            NoData => write!(f, "No data found"),
        }
    }
}

impl std::error::Error for ServiceError {}

impl ResponseError for ServiceError {
    fn error_response(&self) -> HttpResponse {
        error!("{}", self);
        match self {
            ServiceError::InternalServerError => {
                HttpResponse::InternalServerError().body("Internal Server Error. Try again later.")
            }
            ServiceError::BadRequest(s) => HttpResponse::BadRequest().body(s.clone()),
            ServiceError::NoData => HttpResponse::NotFound().body("Data not found"),
        }
    }
}

impl From<mongodb::error::Error> for ServiceError {
    fn from(e: mongodb::error::Error) -> ServiceError {
        error!("mongodb error: {}", e);
        ServiceError::InternalServerError
    }
}

impl From<askama::Error> for ServiceError {
    fn from(e: askama::Error) -> ServiceError {
        error!("template error: {}", e);
        ServiceError::InternalServerError
    }
}
