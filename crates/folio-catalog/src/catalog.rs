// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Catalog queries and administrative mutations over media items.

use std::sync::Arc;

use folio_core::{
    DocumentStore, FolioError, MediaItem, MediaKind, MediaPatch, ObjectStore, PublicMediaItem,
};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::records::RecordSet;

/// Who a listing is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Every record, every field.
    Admin,
    /// Active records only, public fields only.
    Public,
}

/// Result of [`CatalogService::list`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MediaListing {
    Admin(Vec<MediaItem>),
    Public(Vec<PublicMediaItem>),
}

impl MediaListing {
    pub fn len(&self) -> usize {
        match self {
            MediaListing::Admin(items) => items.len(),
            MediaListing::Public(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub struct CatalogService {
    reels: RecordSet<MediaItem>,
    web_designs: RecordSet<MediaItem>,
    objects: Arc<dyn ObjectStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn DocumentStore>, objects: Arc<dyn ObjectStore>) -> Self {
        Self {
            reels: RecordSet::new(Arc::clone(&store), MediaKind::Reel.collection()),
            web_designs: RecordSet::new(store, MediaKind::WebDesign.collection()),
            objects,
        }
    }

    fn records(&self, kind: MediaKind) -> &RecordSet<MediaItem> {
        match kind {
            MediaKind::Reel => &self.reels,
            MediaKind::WebDesign => &self.web_designs,
        }
    }

    /// List a catalog newest first.
    ///
    /// The public scope fetches everything and filters on `isActive` in
    /// memory, so its cost follows the total record count.
    pub async fn list(&self, kind: MediaKind, scope: Scope) -> Result<MediaListing, FolioError> {
        let items = self.records(kind).list().await?;
        Ok(match scope {
            Scope::Admin => MediaListing::Admin(items),
            Scope::Public => MediaListing::Public(
                items
                    .iter()
                    .filter(|item| item.is_active)
                    .map(PublicMediaItem::from)
                    .collect(),
            ),
        })
    }

    /// Apply a partial update. Applying the same patch twice is a no-op the
    /// second time.
    pub async fn update(
        &self,
        kind: MediaKind,
        id: &str,
        patch: MediaPatch,
    ) -> Result<(), FolioError> {
        let fields = patch.into_fields();
        let keys: Vec<&str> = fields.keys().map(String::as_str).collect();
        debug!(collection = %kind.collection(), id, fields = ?keys, "updating media item");
        self.records(kind).patch(id, fields).await?;
        info!(collection = %kind.collection(), id, "media item updated");
        Ok(())
    }

    /// Delete the record and, best-effort, its object.
    ///
    /// The object path comes from `storagePath` or, for older records, from
    /// parsing `url`. Object deletion failures are logged and never stop the
    /// record deletion. Returns whether an object deletion succeeded.
    pub async fn delete(&self, kind: MediaKind, id: &str) -> Result<bool, FolioError> {
        let records = self.records(kind);
        let Some(doc) = records.document(id).await? else {
            debug!(collection = %kind.collection(), id, "media item already absent");
            return Ok(false);
        };

        let path = doc
            .str_field("storagePath")
            .map(str::to_string)
            .or_else(|| doc.str_field("url").and_then(|url| self.objects.path_from_url(url)));

        let removed = match path {
            Some(path) => match self.objects.delete(&path).await {
                Ok(()) => true,
                Err(e) => {
                    warn!(
                        collection = %kind.collection(),
                        id,
                        path = %path,
                        error = %e,
                        "object deletion failed; deleting record anyway"
                    );
                    false
                }
            },
            None => {
                debug!(collection = %kind.collection(), id, "no object path for record");
                false
            }
        };

        records.remove(id).await?;
        info!(collection = %kind.collection(), id, object_removed = removed, "media item deleted");
        Ok(removed)
    }
}
