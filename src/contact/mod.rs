use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod routes;
pub mod store;
pub mod validate;

/// The one persisted entity: a row in the `contacts` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(
        rename = "insertedAt",
        with = "bson::serde_helpers::chrono_datetime_as_bson_datetime"
    )]
    pub inserted_at: DateTime<Utc>,
    #[serde(
        rename = "updatedAt",
        with = "bson::serde_helpers::chrono_datetime_as_bson_datetime"
    )]
    pub updated_at: DateTime<Utc>,
}

impl Contact {
    /// Hex form of the store-assigned id, for links and hidden form fields.
    /// Empty until the contact has been inserted.
    pub fn id_hex(&self) -> String {
        self.id.map(|id| id.to_hex()).unwrap_or_default()
    }
}

/// Body of `POST /contact`.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Body of `PUT /contact/update`. `oldEmail`/`oldPhone` carry the record's
/// pre-edit values so an unchanged field isn't flagged as a duplicate of
/// itself.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateForm {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(rename = "oldEmail")]
    pub old_email: String,
    #[serde(rename = "oldPhone")]
    pub old_phone: String,
}

impl UpdateForm {
    pub fn fields(&self) -> ContactForm {
        ContactForm {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
        }
    }
}

/// Body of `DELETE /contact`.
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteForm {
    pub id: String,
}
