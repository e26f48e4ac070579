// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Document CRUD operations.

use chrono::{DateTime, Duration, SubsecRound, Utc};
use folio_core::types::format_timestamp;
use folio_core::{Collection, Document, FolioError};
use rusqlite::types::Type;
use rusqlite::{OptionalExtension, params};
use serde_json::{Map, Value};

use crate::database::{Database, map_tr_err};

type Fields = Map<String, Value>;

fn encode_fields(fields: &Fields) -> rusqlite::Result<String> {
    serde_json::to_string(fields).map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

fn decode_fields(idx: usize, raw: &str) -> rusqlite::Result<Fields> {
    serde_json::from_str(raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn decode_timestamp(idx: usize, raw: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn row_to_document(row: &rusqlite::Row<'_>) -> rusqlite::Result<Document> {
    let id: String = row.get(0)?;
    let fields: String = row.get(1)?;
    let created_at: String = row.get(2)?;
    Ok(Document {
        id,
        fields: decode_fields(1, &fields)?,
        created_at: decode_timestamp(2, &created_at)?,
    })
}

/// Strip keys the store owns so they never shadow the assigned values.
fn strip_reserved(mut fields: Fields) -> Fields {
    fields.remove("id");
    fields.remove("createdAt");
    fields
}

/// Insert a document with a fresh id.
///
/// `created_at` is the current time, bumped by one microsecond past the
/// newest document in the collection if the clock has not advanced, so that
/// insertion order and timestamp order always agree.
pub async fn insert_document(
    db: &Database,
    collection: Collection,
    fields: Fields,
) -> Result<Document, FolioError> {
    let fields = strip_reserved(fields);
    db.connection()
        .call(move |conn| {
            let newest: Option<String> = conn.query_row(
                "SELECT MAX(created_at) FROM documents WHERE collection = ?1",
                params![collection.as_str()],
                |row| row.get(0),
            )?;
            let mut created_at = Utc::now().trunc_subsecs(6);
            if let Some(newest) = newest {
                let newest = decode_timestamp(0, &newest)?;
                if created_at <= newest {
                    created_at = newest + Duration::microseconds(1);
                }
            }

            let id = uuid::Uuid::new_v4().simple().to_string();
            conn.execute(
                "INSERT INTO documents (collection, id, fields, created_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    collection.as_str(),
                    id,
                    encode_fields(&fields)?,
                    format_timestamp(&created_at),
                ],
            )?;
            Ok(Document {
                id,
                created_at,
                fields,
            })
        })
        .await
        .map_err(map_tr_err)
}

/// Get a document by id.
pub async fn get_document(
    db: &Database,
    collection: Collection,
    id: &str,
) -> Result<Option<Document>, FolioError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            conn.query_row(
                "SELECT id, fields, created_at FROM documents
                 WHERE collection = ?1 AND id = ?2",
                params![collection.as_str(), id],
                row_to_document,
            )
            .optional()
        })
        .await
        .map_err(map_tr_err)
}

/// List a collection, newest first.
pub async fn list_documents(
    db: &Database,
    collection: Collection,
) -> Result<Vec<Document>, FolioError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, fields, created_at FROM documents
                 WHERE collection = ?1
                 ORDER BY created_at DESC, seq DESC",
            )?;
            let rows = stmt.query_map(params![collection.as_str()], row_to_document)?;
            rows.collect()
        })
        .await
        .map_err(map_tr_err)
}

/// Count the documents in a collection.
pub async fn count_documents(db: &Database, collection: Collection) -> Result<usize, FolioError> {
    db.connection()
        .call(move |conn| {
            conn.query_row(
                "SELECT COUNT(*) FROM documents WHERE collection = ?1",
                params![collection.as_str()],
                |row| row.get::<_, i64>(0),
            )
        })
        .await
        .map(|n| n.max(0) as usize)
        .map_err(map_tr_err)
}

/// Merge `fields` into an existing document.
///
/// Returns `NotFound` if no such document exists.
pub async fn update_document(
    db: &Database,
    collection: Collection,
    id: &str,
    fields: Fields,
) -> Result<(), FolioError> {
    let patch = strip_reserved(fields);
    let key = id.to_string();
    let found = db
        .connection()
        .call(move |conn| {
            let tx = conn.transaction()?;
            let current: Option<String> = tx
                .query_row(
                    "SELECT fields FROM documents WHERE collection = ?1 AND id = ?2",
                    params![collection.as_str(), key],
                    |row| row.get(0),
                )
                .optional()?;
            let Some(current) = current else {
                return Ok(false);
            };
            let mut merged = decode_fields(0, &current)?;
            merged.extend(patch);
            tx.execute(
                "UPDATE documents SET fields = ?1 WHERE collection = ?2 AND id = ?3",
                params![encode_fields(&merged)?, collection.as_str(), key],
            )?;
            tx.commit()?;
            Ok(true)
        })
        .await
        .map_err(map_tr_err)?;

    if found {
        Ok(())
    } else {
        Err(FolioError::NotFound {
            collection: collection.to_string(),
            id: id.to_string(),
        })
    }
}

/// Delete a document. Missing documents are ignored.
pub async fn delete_document(
    db: &Database,
    collection: Collection,
    id: &str,
) -> Result<(), FolioError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "DELETE FROM documents WHERE collection = ?1 AND id = ?2",
                params![collection.as_str(), id],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Fields {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn insert_and_get_roundtrips() {
        let db = Database::open_in_memory().await.unwrap();
        let doc = insert_document(
            &db,
            Collection::Contacts,
            fields(json!({"name": "Ana", "status": "unread"})),
        )
        .await
        .unwrap();
        assert!(!doc.id.is_empty());

        let fetched = get_document(&db, Collection::Contacts, &doc.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched, doc);
    }

    #[tokio::test]
    async fn collections_are_isolated() {
        let db = Database::open_in_memory().await.unwrap();
        let doc = insert_document(&db, Collection::Reels, fields(json!({"title": "a"})))
            .await
            .unwrap();
        assert!(
            get_document(&db, Collection::WebDesigns, &doc.id)
                .await
                .unwrap()
                .is_none()
        );
        assert_eq!(count_documents(&db, Collection::Reels).await.unwrap(), 1);
        assert_eq!(count_documents(&db, Collection::WebDesigns).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn list_is_newest_first_even_within_one_clock_tick() {
        let db = Database::open_in_memory().await.unwrap();
        let mut ids = Vec::new();
        for i in 0..20 {
            let doc = insert_document(&db, Collection::Applications, fields(json!({"n": i})))
                .await
                .unwrap();
            ids.push(doc.id);
        }
        let listed: Vec<String> = list_documents(&db, Collection::Applications)
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.id)
            .collect();
        ids.reverse();
        assert_eq!(listed, ids);
    }

    #[tokio::test]
    async fn created_at_strictly_increases() {
        let db = Database::open_in_memory().await.unwrap();
        let a = insert_document(&db, Collection::Reels, Fields::new()).await.unwrap();
        let b = insert_document(&db, Collection::Reels, Fields::new()).await.unwrap();
        assert!(b.created_at > a.created_at);
    }

    #[tokio::test]
    async fn reserved_keys_are_not_stored() {
        let db = Database::open_in_memory().await.unwrap();
        let doc = insert_document(
            &db,
            Collection::Contacts,
            fields(json!({"id": "forged", "createdAt": "1999", "name": "x"})),
        )
        .await
        .unwrap();
        assert_ne!(doc.id, "forged");
        assert!(!doc.fields.contains_key("createdAt"));
    }

    #[tokio::test]
    async fn update_merges_fields() {
        let db = Database::open_in_memory().await.unwrap();
        let doc = insert_document(
            &db,
            Collection::Reels,
            fields(json!({"title": "Old", "isActive": true, "category": "General"})),
        )
        .await
        .unwrap();
        update_document(
            &db,
            Collection::Reels,
            &doc.id,
            fields(json!({"title": "New", "isActive": false})),
        )
        .await
        .unwrap();

        let updated = get_document(&db, Collection::Reels, &doc.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.fields["title"], "New");
        assert_eq!(updated.fields["isActive"], false);
        assert_eq!(updated.fields["category"], "General");
        assert_eq!(updated.created_at, doc.created_at);
    }

    #[tokio::test]
    async fn update_missing_document_is_not_found() {
        let db = Database::open_in_memory().await.unwrap();
        let err = update_document(&db, Collection::Contacts, "nope", Fields::new())
            .await
            .unwrap_err();
        assert!(matches!(err, FolioError::NotFound { .. }));
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let db = Database::open_in_memory().await.unwrap();
        let doc = insert_document(&db, Collection::Contacts, Fields::new())
            .await
            .unwrap();
        delete_document(&db, Collection::Contacts, &doc.id).await.unwrap();
        delete_document(&db, Collection::Contacts, &doc.id).await.unwrap();
        assert!(
            get_document(&db, Collection::Contacts, &doc.id)
                .await
                .unwrap()
                .is_none()
        );
    }
}
