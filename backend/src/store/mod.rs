//! Record Store - in-memory catalogue with optional on-disk snapshot
//!
//! With a data directory, every create rewrites `snapshot.json` and uploaded
//! images are written to `images/` beside it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{StoreError, StoreResult};
use crate::models::{
    ImageUpload, InfoRecord, MasterItem, NewInfoRecord, NewMasterItem, NewOfferRecord,
    OfferRecord,
};

const SNAPSHOT_FILE: &str = "snapshot.json";
const IMAGES_DIR: &str = "images";

/// An uploaded image held by the store
#[derive(Debug, Clone)]
pub struct StoredImage {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ImageMeta {
    file: String,
    content_type: String,
}

/// On-disk layout of `snapshot.json`
#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    saved_at: DateTime<Utc>,
    #[serde(default)]
    master: Vec<MasterItem>,
    #[serde(default)]
    info: Vec<InfoRecord>,
    #[serde(default)]
    offers: Vec<OfferRecord>,
    #[serde(default)]
    images: Vec<ImageMeta>,
}

/// Number of records per collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordCounts {
    pub master: usize,
    pub info: usize,
    pub offers: usize,
}

/// The three collections plus uploaded images
#[derive(Debug, Default)]
pub struct RecordStore {
    data_dir: Option<PathBuf>,
    master: Vec<MasterItem>,
    info: Vec<InfoRecord>,
    offers: Vec<OfferRecord>,
    images: HashMap<String, StoredImage>,
    /// Image file names in upload order, for the snapshot
    image_order: Vec<String>,
}

impl RecordStore {
    /// Store that lives only as long as the process
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Open a store backed by `dir`, loading an existing snapshot if present
    pub fn open(dir: impl AsRef<Path>) -> StoreResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(dir.join(IMAGES_DIR))?;

        let mut store = Self {
            data_dir: Some(dir.clone()),
            ..Self::default()
        };

        let snapshot_path = dir.join(SNAPSHOT_FILE);
        if !snapshot_path.exists() {
            return Ok(store);
        }

        let content = fs::read_to_string(&snapshot_path)?;
        let snapshot: Snapshot = serde_json::from_str(&content)?;

        for meta in snapshot.images {
            let path = dir.join(IMAGES_DIR).join(&meta.file);
            if !path.exists() {
                return Err(StoreError::MissingImage(meta.file));
            }
            let bytes = fs::read(&path)?;
            store.image_order.push(meta.file.clone());
            store.images.insert(
                meta.file,
                StoredImage { content_type: meta.content_type, bytes },
            );
        }

        store.master = snapshot.master;
        store.info = snapshot.info;
        store.offers = snapshot.offers;

        tracing::info!(
            path = %snapshot_path.display(),
            saved_at = %snapshot.saved_at,
            "loaded snapshot"
        );
        Ok(store)
    }

    pub fn data_dir(&self) -> Option<&Path> {
        self.data_dir.as_deref()
    }

    pub fn master(&self) -> &[MasterItem] {
        &self.master
    }

    pub fn info(&self) -> &[InfoRecord] {
        &self.info
    }

    pub fn offers(&self) -> &[OfferRecord] {
        &self.offers
    }

    pub fn counts(&self) -> RecordCounts {
        RecordCounts {
            master: self.master.len(),
            info: self.info.len(),
            offers: self.offers.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.counts() == RecordCounts::default()
    }

    pub fn image(&self, file: &str) -> Option<&StoredImage> {
        self.images.get(file)
    }

    /// Store the image and add a master item pointing at `<public_url>/images/<file>`
    ///
    /// If the snapshot cannot be written the store is left as it was and the
    /// image file is removed again.
    pub fn add_master(
        &mut self,
        item: NewMasterItem,
        image: ImageUpload,
        public_url: &str,
    ) -> StoreResult<MasterItem> {
        let file = image_file_name(&image);
        let image_path = self.data_dir.as_ref().map(|dir| dir.join(IMAGES_DIR).join(&file));

        if let Some(path) = &image_path {
            fs::write(path, &image.bytes)?;
        }

        let record = MasterItem {
            id: next_id(self.master.iter().map(|m| m.id)),
            name: item.name,
            category: item.category,
            image: format!("{}/{}/{}", public_url.trim_end_matches('/'), IMAGES_DIR, file),
            aisle: item.aisle,
            size: item.size,
        };

        self.images.insert(
            file.clone(),
            StoredImage { content_type: image.content_type, bytes: image.bytes },
        );
        self.image_order.push(file.clone());
        self.master.push(record.clone());

        if let Err(e) = self.persist() {
            self.master.pop();
            self.image_order.pop();
            self.images.remove(&file);
            if let Some(path) = &image_path {
                if let Err(remove_err) = fs::remove_file(path) {
                    tracing::warn!(path = %path.display(), error = %remove_err, "orphan image left behind");
                }
            }
            return Err(e);
        }

        Ok(record)
    }

    pub fn add_info(&mut self, record: NewInfoRecord) -> StoreResult<InfoRecord> {
        let record = InfoRecord {
            id: next_id(self.info.iter().map(|r| r.id)),
            name: record.name,
            kind: record.kind,
            alcohol_content: record.alcohol_content,
            country: record.country,
            flavor: record.flavor,
            age: record.age,
            best_for: record.best_for,
        };

        self.info.push(record.clone());
        if let Err(e) = self.persist() {
            self.info.pop();
            return Err(e);
        }
        Ok(record)
    }

    pub fn add_offer(&mut self, offer: NewOfferRecord) -> StoreResult<OfferRecord> {
        let record = OfferRecord {
            id: next_id(self.offers.iter().map(|o| o.id)),
            category: offer.category,
            size: offer.size,
            brand: offer.brand,
            flavors: offer.flavors,
        };

        self.offers.push(record.clone());
        if let Err(e) = self.persist() {
            self.offers.pop();
            return Err(e);
        }
        Ok(record)
    }

    /// Rewrite `snapshot.json`. No-op for in-memory stores.
    pub fn persist(&self) -> StoreResult<()> {
        let Some(dir) = &self.data_dir else {
            return Ok(());
        };

        let images = self
            .image_order
            .iter()
            .filter_map(|file| {
                self.images.get(file).map(|image| ImageMeta {
                    file: file.clone(),
                    content_type: image.content_type.clone(),
                })
            })
            .collect();

        let snapshot = Snapshot {
            saved_at: Utc::now(),
            master: self.master.clone(),
            info: self.info.clone(),
            offers: self.offers.clone(),
            images,
        };

        // Readers never observe a partially written snapshot
        let tmp = dir.join(format!("{}.tmp", SNAPSHOT_FILE));
        fs::write(&tmp, serde_json::to_string_pretty(&snapshot)?)?;
        fs::rename(&tmp, dir.join(SNAPSHOT_FILE))?;

        tracing::debug!(counts = ?self.counts(), "snapshot written");
        Ok(())
    }
}

fn next_id(ids: impl Iterator<Item = u64>) -> u64 {
    ids.max().unwrap_or(0) + 1
}

/// `<uuid>.<ext>`, the extension taken from the client file name or the content type
fn image_file_name(image: &ImageUpload) -> String {
    let from_name = image
        .file_name
        .as_deref()
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .map(str::to_string);

    let from_type = || {
        image
            .content_type
            .strip_prefix("image/")
            .map(|subtype| subtype.split('+').next().unwrap_or(subtype).to_string())
    };

    let ext = from_name
        .or_else(from_type)
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_else(|| "bin".to_string());

    format!("{}.{}", uuid::Uuid::new_v4(), ext)
}

// =============================================================================
// Demo data
// =============================================================================

const DEMO_LABEL_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="120" height="160"><rect width="120" height="160" fill="#6b3e26"/><text x="60" y="85" font-size="14" text-anchor="middle" fill="#fff">DEMO</text></svg>"##;

/// Fill an empty store with a few demo records. Returns `false` when the
/// store already holds data and nothing was written.
pub fn seed(store: &mut RecordStore, public_url: &str) -> StoreResult<bool> {
    if !store.is_empty() {
        return Ok(false);
    }

    for (name, category, aisle, size) in [
        ("Glen Demo 12", "Whiskey", "A1", "750ml"),
        ("Harbour Gin", "Gin", "B2", "70cl"),
    ] {
        store.add_master(
            NewMasterItem {
                name: name.into(),
                category: category.into(),
                aisle: aisle.into(),
                size: size.into(),
            },
            ImageUpload {
                file_name: Some("label.svg".into()),
                content_type: "image/svg+xml".into(),
                bytes: DEMO_LABEL_SVG.as_bytes().to_vec(),
            },
            public_url,
        )?;
    }

    store.add_info(NewInfoRecord {
        name: "Glen Demo 12".into(),
        kind: "Single Malt".into(),
        alcohol_content: "40%".into(),
        country: "Scotland".into(),
        flavor: "Honey, oak".into(),
        age: "12".into(),
        best_for: "Neat".into(),
    })?;

    store.add_offer(NewOfferRecord {
        category: "Whiskey".into(),
        size: "750ml".into(),
        brand: "Glen Demo".into(),
        flavors: "Smoky".into(),
    })?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn png(name: &str) -> ImageUpload {
        ImageUpload {
            file_name: Some(name.into()),
            content_type: "image/png".into(),
            bytes: vec![0x89, b'P', b'N', b'G'],
        }
    }

    fn offer(brand: &str) -> NewOfferRecord {
        NewOfferRecord {
            category: "Whiskey".into(),
            size: "750ml".into(),
            brand: brand.into(),
            flavors: "Smoky".into(),
        }
    }

    #[test]
    fn test_ids_start_at_one_per_collection() {
        let mut store = RecordStore::in_memory();

        let first = store.add_offer(offer("Acme")).unwrap();
        let second = store.add_offer(offer("Brand")).unwrap();
        let info = store.add_info(NewInfoRecord::default()).unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(info.id, 1);
        assert_eq!(store.offers()[1].brand, "Brand");
    }

    #[test]
    fn test_master_image_url_and_lookup() {
        let mut store = RecordStore::in_memory();
        let item = store
            .add_master(NewMasterItem::default(), png("bottle.PNG"), "http://localhost:3000/")
            .unwrap();

        let file = item
            .image
            .strip_prefix("http://localhost:3000/images/")
            .unwrap();
        assert!(file.ends_with(".png"));

        let image = store.image(file).unwrap();
        assert_eq!(image.content_type, "image/png");
        assert_eq!(image.bytes.len(), 4);
    }

    #[test]
    fn test_image_extension_falls_back_to_content_type() {
        let upload = ImageUpload {
            file_name: None,
            content_type: "image/svg+xml".into(),
            bytes: Vec::new(),
        };
        assert!(image_file_name(&upload).ends_with(".svg"));

        let unknown = ImageUpload {
            file_name: Some("weird.p/g".into()),
            content_type: "application/octet-stream".into(),
            bytes: Vec::new(),
        };
        assert!(image_file_name(&unknown).ends_with(".bin"));
    }

    #[test]
    fn test_snapshot_reload() {
        let dir = tempdir().unwrap();

        let url = {
            let mut store = RecordStore::open(dir.path()).unwrap();
            store.add_offer(offer("Acme")).unwrap();
            store
                .add_master(NewMasterItem { name: "Glenfoo".into(), ..Default::default() }, png("a.png"), "http://x")
                .unwrap()
                .image
        };

        let store = RecordStore::open(dir.path()).unwrap();
        assert_eq!(store.counts(), RecordCounts { master: 1, info: 0, offers: 1 });
        assert_eq!(store.master()[0].image, url);

        let file = url.rsplit('/').next().unwrap();
        assert!(store.image(file).is_some());
        assert!(dir.path().join("images").join(file).exists());
    }

    #[test]
    fn test_missing_image_file_is_an_error() {
        let dir = tempdir().unwrap();
        {
            let mut store = RecordStore::open(dir.path()).unwrap();
            store.add_master(NewMasterItem::default(), png("a.png"), "http://x").unwrap();
        }

        for entry in fs::read_dir(dir.path().join("images")).unwrap() {
            fs::remove_file(entry.unwrap().path()).unwrap();
        }

        assert!(matches!(
            RecordStore::open(dir.path()),
            Err(StoreError::MissingImage(_))
        ));
    }

    /// A directory in place of the temp file makes every snapshot write fail.
    fn block_snapshot_writes(dir: &Path) {
        fs::create_dir(dir.join(format!("{}.tmp", SNAPSHOT_FILE))).unwrap();
    }

    #[test]
    fn test_failed_persist_rolls_back_json_creates() {
        let dir = tempdir().unwrap();
        let mut store = RecordStore::open(dir.path()).unwrap();
        store.add_offer(offer("Kept")).unwrap();
        block_snapshot_writes(dir.path());

        assert!(store.add_offer(offer("Lost")).is_err());
        assert!(store.add_info(NewInfoRecord::default()).is_err());

        assert_eq!(store.counts(), RecordCounts { master: 0, info: 0, offers: 1 });
        assert_eq!(store.offers()[0].brand, "Kept");
    }

    #[test]
    fn test_failed_persist_rolls_back_master_and_image() {
        let dir = tempdir().unwrap();
        let mut store = RecordStore::open(dir.path()).unwrap();
        block_snapshot_writes(dir.path());

        assert!(store
            .add_master(NewMasterItem::default(), png("a.png"), "http://x")
            .is_err());

        assert!(store.master().is_empty());
        assert!(store.image_order.is_empty());
        assert!(store.images.is_empty());
        assert_eq!(fs::read_dir(dir.path().join("images")).unwrap().count(), 0);
    }

    #[test]
    fn test_seed_only_fills_empty_store() {
        let mut store = RecordStore::in_memory();
        assert!(seed(&mut store, "http://localhost:3000").unwrap());
        assert_eq!(store.counts(), RecordCounts { master: 2, info: 1, offers: 1 });

        assert!(!seed(&mut store, "http://localhost:3000").unwrap());
        assert_eq!(store.counts().master, 2);
    }
}
