//! One-time messages carried across a redirect in the session cookie.

use actix_session::Session;
use log::*;

const FLASH_KEY: &str = "flash";

/// Stashes a message to be shown on the next rendered page.
pub fn set_flash(session: &Session, message: &str) {
    if let Err(e) = session.insert(FLASH_KEY, message) {
        warn!("couldn't stash flash message: {}", e);
    }
}

/// Pulls the pending message out of the session, removing it so it only
/// ever renders once.
pub fn take_flash(session: &Session) -> Option<String> {
    let message = session.get::<String>(FLASH_KEY).ok().flatten();
    if message.is_some() {
        session.remove(FLASH_KEY);
    }
    message
}

#[cfg(test)]
mod test {
    use super::*;
    use actix_session::{storage::CookieSessionStore, SessionMiddleware};
    use actix_web::test::{call_and_read_body, call_service, init_service, TestRequest};
    use actix_web::{cookie::Key, get, App, HttpResponse};

    #[get("/set")]
    async fn set(session: Session) -> HttpResponse {
        set_flash(&session, "saved!");
        HttpResponse::Ok().finish()
    }

    #[get("/take")]
    async fn take(session: Session) -> HttpResponse {
        let first = take_flash(&session).unwrap_or_default();
        let second = take_flash(&session).unwrap_or_default();
        HttpResponse::Ok().body(format!("{}|{}", first, second))
    }

    #[actix_rt::test]
    async fn flash_renders_exactly_once() {
        let app = init_service(
            App::new()
                .wrap(
                    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
                        .cookie_secure(false)
                        .build(),
                )
                .service(set)
                .service(take),
        )
        .await;

        let res = call_service(&app, TestRequest::get().uri("/set").to_request()).await;
        let cookie = res
            .response()
            .cookies()
            .next()
            .expect("no session cookie")
            .into_owned();

        let req = TestRequest::get().uri("/take").cookie(cookie).to_request();
        let body = call_and_read_body(&app, req).await;
        assert_eq!(body, "saved!|");
    }

    #[actix_rt::test]
    async fn no_flash_means_no_message() {
        let app = init_service(
            App::new()
                .wrap(
                    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
                        .cookie_secure(false)
                        .build(),
                )
                .service(take),
        )
        .await;

        let body = call_and_read_body(&app, TestRequest::get().uri("/take").to_request()).await;
        assert_eq!(body, "|");
    }
}
