use actix_session::{config::PersistentSession, storage::CookieSessionStore, SessionMiddleware};
use actix_web::{
    cookie::{time::Duration, Key},
    middleware::Logger,
    web, App, HttpServer,
};
use log::*;

use contact_book::contact::{routes, store::ContactStore};
use contact_book::{data, middlewares::MethodOverride, pages};

const DEFAULT_SESSION_TTL_SECONDS: i64 = 600;

/// Session cookie lifetime, overridable via `SESSION_TTL_SECONDS`.
fn session_ttl() -> Duration {
    std::env::var("SESSION_TTL_SECONDS")
        .ok()
        .and_then(|raw| raw.parse().ok())
        .map(Duration::seconds)
        .unwrap_or(Duration::seconds(DEFAULT_SESSION_TTL_SECONDS))
}

#[actix_rt::main]
async fn main() -> std::io::Result<()> {
    pretty_env_logger::init();

    let db = data::get_mongo_database()
        .await
        .unwrap_or_else(|e| panic!("couldn't set up the mongo connection: {}", e));

    let store = ContactStore::new(&db);
    if let Err(e) = store.ensure_indexes().await {
        error!("couldn't ensure unique contact indexes: {}", e);
    }

    let store = web::Data::new(store);
    let session_key = Key::generate();
    let session_ttl = session_ttl();

    HttpServer::new(move || {
        App::new()
            .app_data(store.clone())
            .wrap(MethodOverride)
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), session_key.clone())
                    .cookie_secure(false)
                    .session_lifecycle(PersistentSession::default().session_ttl(session_ttl))
                    .build(),
            )
            .wrap(Logger::default())
            .service(pages::home)
            .service(pages::about)
            .service(routes::contact_list)
            .service(routes::add_form)
            .service(routes::add_contact)
            .service(routes::edit_form)
            .service(routes::update_contact)
            .service(routes::delete_contact)
            .service(routes::contact_detail)
            .default_service(web::to(pages::not_found))
    })
    .bind("127.0.0.1:3000")?
    .run()
    .await
}
