use bson::{doc, oid::ObjectId};
use chrono::Utc;
use futures::stream::TryStreamExt;
use mongodb::{
    options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument},
    Collection, Database, IndexModel,
};

use super::{Contact, ContactForm};
use crate::ServiceError;

const COLLECTION_NAME: &str = "contacts";

/// All persistence for [`Contact`]s. Wraps the typed collection handle; cheap
/// to clone, one per `web::Data` registration.
#[derive(Clone)]
pub struct ContactStore {
    collection: Collection<Contact>,
}

impl ContactStore {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION_NAME),
        }
    }

    /// Creates the unique indexes on `email` and `phone`, so the store itself
    /// rejects the losing writer when two concurrent submissions slip past the
    /// validation layer's read-before-write.
    pub async fn ensure_indexes(&self) -> Result<(), mongodb::error::Error> {
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.collection.create_index(email_index, None).await?;

        let phone_index = IndexModel::builder()
            .keys(doc! { "phone": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.collection.create_index(phone_index, None).await?;

        Ok(())
    }

    /// Inserts a new contact; both timestamps are set to now.
    pub async fn create(&self, fields: &ContactForm) -> Result<Contact, ServiceError> {
        let now = Utc::now();
        let mut contact = Contact {
            id: None,
            name: fields.name.clone(),
            email: fields.email.clone(),
            phone: fields.phone.clone(),
            inserted_at: now,
            updated_at: now,
        };

        let inserted = self.collection.insert_one(&contact, None).await?;
        contact.id = inserted.inserted_id.as_object_id();

        Ok(contact)
    }

    pub async fn find_all(&self) -> Result<Vec<Contact>, ServiceError> {
        let mut cursor = self.collection.find(None, None).await?;

        let mut contacts = Vec::new();
        while let Some(contact) = cursor.try_next().await? {
            contacts.push(contact);
        }

        Ok(contacts)
    }

    /// An id that doesn't parse as an ObjectId behaves like a miss.
    pub async fn find_by_id(&self, id: &str) -> Result<Option<Contact>, ServiceError> {
        let Ok(oid) = ObjectId::parse_str(id) else {
            return Ok(None);
        };

        Ok(self.collection.find_one(doc! { "_id": oid }, None).await?)
    }

    /// Single-field lookup; the validation layer uses this for its
    /// uniqueness probes on `email` and `phone`.
    pub async fn find_one_by(&self, field: &str, value: &str) -> Result<Option<Contact>, ServiceError> {
        Ok(self
            .collection
            .find_one(doc! { field: value }, None)
            .await?)
    }

    /// `$set`s the editable fields and refreshes `updatedAt`, returning the
    /// post-update document. A missing or unparseable id is `NoData`.
    pub async fn update_by_id(&self, id: &str, fields: &ContactForm) -> Result<Contact, ServiceError> {
        let oid = ObjectId::parse_str(id).map_err(|_| ServiceError::NoData)?;

        let update = doc! {
            "$set": {
                "name": fields.name.clone(),
                "email": fields.email.clone(),
                "phone": fields.phone.clone(),
                "updatedAt": bson::DateTime::now(),
            }
        };
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        self.collection
            .find_one_and_update(doc! { "_id": oid }, update, options)
            .await?
            .ok_or(ServiceError::NoData)
    }

    /// Hard delete. Returns the removed contact, or `None` when nothing
    /// matched.
    pub async fn delete_by_id(&self, id: &str) -> Result<Option<Contact>, ServiceError> {
        let Ok(oid) = ObjectId::parse_str(id) else {
            return Ok(None);
        };

        Ok(self
            .collection
            .find_one_and_delete(doc! { "_id": oid }, None)
            .await?)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::data::get_mongo_database;

    fn fields(name: &str, email: &str, phone: &str) -> ContactForm {
        ContactForm {
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
        }
    }

    // Talks to a live mongod; run with `cargo test -- --ignored` when
    // MONGO_URL points somewhere real.
    #[actix_rt::test]
    #[ignore]
    async fn contact_roundtrip() -> Result<(), ServiceError> {
        let db = get_mongo_database().await.expect("no db");
        let store = ContactStore::new(&db);

        let created = store
            .create(&fields("Ada", "ada@x.com", "081234567890"))
            .await?;
        let id = created.id_hex();
        assert!(!id.is_empty(), "insert should assign an id");
        assert_eq!(created.inserted_at, created.updated_at);

        let fetched = store.find_by_id(&id).await?.expect("no contact");
        assert_eq!(fetched.email, "ada@x.com");

        let updated = store
            .update_by_id(&id, &fields("Ada", "ada@x.com", "081234567891"))
            .await?;
        assert_eq!(updated.phone, "081234567891");
        assert_eq!(updated.inserted_at, created.inserted_at);
        assert!(updated.updated_at >= created.updated_at);

        let deleted = store.delete_by_id(&id).await?.expect("nothing deleted");
        assert_eq!(deleted.id, updated.id);
        assert!(store.find_by_id(&id).await?.is_none());

        Ok(())
    }

    #[actix_rt::test]
    #[ignore]
    async fn unknown_ids_are_misses() -> Result<(), ServiceError> {
        let db = get_mongo_database().await.expect("no db");
        let store = ContactStore::new(&db);

        assert!(store.find_by_id("not-an-oid").await?.is_none());
        assert!(store.delete_by_id("not-an-oid").await?.is_none());
        let missing = ObjectId::new().to_hex();
        assert!(store.delete_by_id(&missing).await?.is_none());
        assert!(matches!(
            store
                .update_by_id(&missing, &fields("A", "a@b.c", "081111111111"))
                .await,
            Err(ServiceError::NoData)
        ));

        Ok(())
    }
}
