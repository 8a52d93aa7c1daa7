//! [`ContentStore`] backed by JSON files on local disk.
//!
//! Used when no database is configured. Each entity collection lives in
//! `<dir>/<collection>.json` as a JSON array. Files are read on first use
//! and cached; every mutation rewrites the whole file through a temporary
//! file and a rename, so readers never observe a half-written file.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use clubsite_core::types::{new_record_id, RecordId};
use tokio::sync::RwLock;

use crate::entity::Entity;
use crate::error::StoreError;
use crate::models::event::Event;
use crate::models::gallery_item::GalleryItem;
use crate::models::project::Project;
use crate::models::team_member::TeamMember;
use crate::store::{ContentStore, EntityStore};

/// One cached JSON array file.
pub struct Collection<E> {
    path: PathBuf,
    /// `None` until the file has been read.
    records: RwLock<Option<Vec<E>>>,
}

impl<E: Entity> Collection<E> {
    fn new(dir: &Path) -> Self {
        Self {
            path: dir.join(format!("{}.json", E::COLLECTION)),
            records: RwLock::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read<R, F>(&self, f: F) -> Result<R, StoreError>
    where
        F: FnOnce(&[E]) -> R + Send,
    {
        {
            let guard = self.records.read().await;
            if let Some(records) = guard.as_deref() {
                return Ok(f(records));
            }
        }
        let mut guard = self.records.write().await;
        let records = self.loaded(&mut guard).await?;
        Ok(f(records))
    }

    /// Run `f` against a copy of the collection and persist the copy.
    ///
    /// `f` returns `None` to signal "nothing changed", in which case the
    /// file is not rewritten. The cache is only replaced after the write
    /// succeeds.
    async fn mutate<R, F>(&self, f: F) -> Result<Option<R>, StoreError>
    where
        F: FnOnce(&mut Vec<E>) -> Option<R> + Send,
    {
        let mut guard = self.records.write().await;
        let records = self.loaded(&mut guard).await?;
        let mut next = records.clone();
        let Some(out) = f(&mut next) else {
            return Ok(None);
        };
        self.persist(&next).await?;
        *records = next;
        Ok(Some(out))
    }

    async fn loaded<'a>(
        &self,
        slot: &'a mut Option<Vec<E>>,
    ) -> Result<&'a mut Vec<E>, StoreError> {
        let records = match slot.take() {
            Some(records) => records,
            None => self.load_from_disk().await?,
        };
        Ok(slot.insert(records))
    }

    async fn load_from_disk(&self) -> Result<Vec<E>, StoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "Data file missing, starting empty");
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        let records: Vec<E> =
            serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt {
                path: self.path.clone(),
                source,
            })?;
        tracing::debug!(
            path = %self.path.display(),
            count = records.len(),
            "Loaded data file"
        );
        Ok(records)
    }

    async fn persist(&self, records: &[E]) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(records)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &bytes)
            .await
            .map_err(|source| StoreError::Io {
                path: tmp.clone(),
                source,
            })?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|source| StoreError::Io {
                path: self.path.clone(),
                source,
            })?;
        Ok(())
    }
}

/// Fallback backend storing every collection in a data directory.
pub struct JsonFileStore {
    dir: PathBuf,
    events: Collection<Event>,
    team_members: Collection<TeamMember>,
    gallery_items: Collection<GalleryItem>,
    projects: Collection<Project>,
}

impl JsonFileStore {
    /// Open (and create, if needed) the data directory.
    ///
    /// Files are not read until the first request touches them.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|source| StoreError::Io {
                path: dir.clone(),
                source,
            })?;
        Ok(Self {
            events: Collection::new(&dir),
            team_members: Collection::new(&dir),
            gallery_items: Collection::new(&dir),
            projects: Collection::new(&dir),
            dir,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

/// Selects the collection that holds a given entity type.
pub trait HasCollection<E> {
    fn collection(&self) -> &Collection<E>;
}

impl HasCollection<Event> for JsonFileStore {
    fn collection(&self) -> &Collection<Event> {
        &self.events
    }
}

impl HasCollection<TeamMember> for JsonFileStore {
    fn collection(&self) -> &Collection<TeamMember> {
        &self.team_members
    }
}

impl HasCollection<GalleryItem> for JsonFileStore {
    fn collection(&self) -> &Collection<GalleryItem> {
        &self.gallery_items
    }
}

impl HasCollection<Project> for JsonFileStore {
    fn collection(&self) -> &Collection<Project> {
        &self.projects
    }
}

#[async_trait]
impl<E: Entity> EntityStore<E> for JsonFileStore
where
    JsonFileStore: HasCollection<E>,
{
    async fn list(&self, filter: &E::Filter) -> Result<Vec<E>, StoreError> {
        let today = Utc::now().date_naive();
        HasCollection::<E>::collection(self)
            .read(|records| {
                let mut out: Vec<E> = records
                    .iter()
                    .filter(|r| r.matches(filter, today))
                    .cloned()
                    .collect();
                out.sort_by(E::list_order);
                out
            })
            .await
    }

    async fn find_by_id(&self, id: RecordId) -> Result<Option<E>, StoreError> {
        HasCollection::<E>::collection(self)
            .read(|records| records.iter().find(|r| r.id() == id).cloned())
            .await
    }

    async fn create(&self, input: E::Create) -> Result<E, StoreError> {
        let record = E::from_create(new_record_id(), Utc::now(), input);
        let stored = record.clone();
        HasCollection::<E>::collection(self)
            .mutate(move |records| {
                records.push(stored);
                Some(())
            })
            .await?;
        Ok(record)
    }

    async fn update(&self, id: RecordId, input: E::Update) -> Result<Option<E>, StoreError> {
        let now = Utc::now();
        HasCollection::<E>::collection(self)
            .mutate(move |records| {
                let record = records.iter_mut().find(|r| r.id() == id)?;
                record.apply_update(input, now);
                Some(record.clone())
            })
            .await
    }

    async fn delete(&self, id: RecordId) -> Result<bool, StoreError> {
        let removed = HasCollection::<E>::collection(self)
            .mutate(|records| {
                let index = records.iter().position(|r| r.id() == id)?;
                records.remove(index);
                Some(())
            })
            .await?;
        Ok(removed.is_some())
    }
}

#[async_trait]
impl ContentStore for JsonFileStore {
    fn backend_name(&self) -> &'static str {
        "json-file"
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        let metadata = tokio::fs::metadata(&self.dir)
            .await
            .map_err(|source| StoreError::Io {
                path: self.dir.clone(),
                source,
            })?;
        if !metadata.is_dir() {
            return Err(StoreError::Io {
                path: self.dir.clone(),
                source: std::io::Error::other("data path is not a directory"),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::models::event::{CreateEvent, EventCategory, EventFilter, UpdateEvent};
    use crate::models::project::{AccentColor, CreateProject, ProjectFilter};

    fn new_event(title: &str, date: NaiveDate) -> CreateEvent {
        CreateEvent {
            title: title.to_string(),
            description: "Something fun".to_string(),
            event_date: date,
            event_time: Some("18:00".to_string()),
            location: "Student Union".to_string(),
            category: EventCategory::Meetup,
            image_url: None,
            registration_url: None,
            is_featured: false,
            display_order: 0,
        }
    }

    fn new_project(title: &str, order: i32, color: AccentColor) -> CreateProject {
        CreateProject {
            title: title.to_string(),
            description: "A project".to_string(),
            tech_stack: vec!["Rust".to_string()],
            image_url: None,
            github_url: None,
            demo_url: None,
            color,
            display_order: order,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn missing_files_read_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).await.unwrap();

        let events: Vec<Event> = store.list(&EventFilter::default()).await.unwrap();
        assert!(events.is_empty());
    }

    #[tokio::test]
    async fn create_then_read_returns_same_fields() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).await.unwrap();

        let created: Event = store
            .create(new_event("Kickoff", date(2030, 1, 15)))
            .await
            .unwrap();
        let found: Option<Event> = store.find_by_id(created.id).await.unwrap();

        assert_eq!(found, Some(created));
    }

    #[tokio::test]
    async fn update_then_read_reflects_update() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).await.unwrap();
        let created: Event = store
            .create(new_event("Kickoff", date(2030, 1, 15)))
            .await
            .unwrap();

        let patch = UpdateEvent {
            title: Some("Kickoff (moved)".to_string()),
            event_date: Some(date(2030, 1, 22)),
            ..Default::default()
        };
        let updated: Event = EntityStore::<Event>::update(&store, created.id, patch)
            .await
            .unwrap()
            .expect("event exists");
        assert_eq!(updated.title, "Kickoff (moved)");
        assert!(updated.updated_at >= created.updated_at);

        let found: Event = store.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found.event_date, date(2030, 1, 22));
        assert_eq!(found.location, "Student Union");
    }

    #[tokio::test]
    async fn update_missing_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).await.unwrap();

        let result =
            EntityStore::<Event>::update(&store, new_record_id(), UpdateEvent::default())
                .await
                .unwrap();
        assert!(result.is_none());
        assert!(!dir.path().join("events.json").exists());
    }

    #[tokio::test]
    async fn delete_then_read_returns_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).await.unwrap();
        let created: Event = store
            .create(new_event("Kickoff", date(2030, 1, 15)))
            .await
            .unwrap();

        assert!(EntityStore::<Event>::delete(&store, created.id).await.unwrap());
        assert!(!EntityStore::<Event>::delete(&store, created.id).await.unwrap());

        let found: Option<Event> = store.find_by_id(created.id).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn records_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let created: Project = {
            let store = JsonFileStore::open(dir.path()).await.unwrap();
            store
                .create(new_project("Robot", 0, AccentColor::Green))
                .await
                .unwrap()
        };

        let reopened = JsonFileStore::open(dir.path()).await.unwrap();
        let found: Option<Project> = reopened.find_by_id(created.id).await.unwrap();
        assert_eq!(found, Some(created));
        assert!(dir.path().join("projects.json").exists());
        assert!(!dir.path().join("projects.json.tmp").exists());
    }

    #[tokio::test]
    async fn list_sorts_by_display_order_and_filters() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).await.unwrap();
        let _: Project = store
            .create(new_project("Third", 3, AccentColor::Blue))
            .await
            .unwrap();
        let _: Project = store
            .create(new_project("First", 1, AccentColor::Pink))
            .await
            .unwrap();
        let _: Project = store
            .create(new_project("Second", 2, AccentColor::Blue))
            .await
            .unwrap();

        let all: Vec<Project> = store.list(&ProjectFilter::default()).await.unwrap();
        let titles: Vec<_> = all.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Second", "Third"]);

        let blue: Vec<Project> = store
            .list(&ProjectFilter {
                color: Some(AccentColor::Blue),
            })
            .await
            .unwrap();
        let titles: Vec<_> = blue.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Second", "Third"]);
    }

    #[tokio::test]
    async fn upcoming_filter_splits_past_and_future() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).await.unwrap();
        let _: Event = store
            .create(new_event("Long ago", date(2000, 5, 1)))
            .await
            .unwrap();
        let _: Event = store
            .create(new_event("Far future", date(2099, 5, 1)))
            .await
            .unwrap();

        let upcoming: Vec<Event> = store
            .list(&EventFilter {
                category: None,
                upcoming: Some(true),
            })
            .await
            .unwrap();
        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].title, "Far future");

        let past: Vec<Event> = store
            .list(&EventFilter {
                category: None,
                upcoming: Some(false),
            })
            .await
            .unwrap();
        assert_eq!(past.len(), 1);
        assert_eq!(past[0].title, "Long ago");
    }

    #[tokio::test]
    async fn corrupt_file_is_reported_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.json");
        std::fs::write(&path, b"{ not json").unwrap();

        let store = JsonFileStore::open(dir.path()).await.unwrap();
        let err = EntityStore::<Event>::list(&store, &EventFilter::default())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }));

        let result =
            EntityStore::<Event>::create(&store, new_event("Kickoff", date(2030, 1, 15))).await;
        assert!(result.is_err());
        assert_eq!(std::fs::read(&path).unwrap(), b"{ not json");
    }

    #[tokio::test]
    async fn health_check_passes_for_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("nested")).await.unwrap();
        assert!(store.health_check().await.is_ok());
        assert_eq!(store.backend_name(), "json-file");
    }
}
