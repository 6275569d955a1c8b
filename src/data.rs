use mongodb::{options::ClientOptions, Client, Database};
use std::env;

const DEFAULT_MONGO_URL: &str = "mongodb://127.0.0.1:27017";
const DATABASE_NAME: &str = "contact_book";

/// Returns a mongo client according to the configured mongo URL.
pub async fn get_mongo_client() -> Result<Client, mongodb::error::Error> {
    let url = env::var("MONGO_URL").unwrap_or_else(|_| DEFAULT_MONGO_URL.to_string());
    let client_options = ClientOptions::parse(&url).await?;

    Client::with_options(client_options)
}

/// Returns the contact book's database from get_mongo_client().
///
/// Called exactly once, at startup; the resulting handle is injected into the
/// app through `web::Data` rather than re-resolved per request.
pub async fn get_mongo_database() -> Result<Database, mongodb::error::Error> {
    let client = get_mongo_client().await?;

    Ok(client.database(DATABASE_NAME))
}

#[cfg(test)]
mod test {
    use super::*;

    // Talks to a live mongod, like the rest of the `--ignored` suite.
    #[actix_rt::test]
    #[ignore]
    async fn simple_mongo() {
        get_mongo_database().await.expect("no db");
    }
}
