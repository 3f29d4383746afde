// src/store/mod.rs

use serde::{Serialize, de::DeserializeOwned};
use std::io;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// A persistable record with a string identifier.
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    fn id(&self) -> &str;
}

#[derive(Debug)]
pub enum StoreError {
    Io(io::Error),
    /// The collection file exists but does not deserialize.
    Corrupt {
        file: PathBuf,
        source: serde_json::Error,
    },
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "store io error: {}", e),
            StoreError::Corrupt { file, source } => {
                write!(f, "corrupt collection file {}: {}", file.display(), source)
            }
        }
    }
}

impl std::error::Error for StoreError {}

impl From<io::Error> for StoreError {
    fn from(err: io::Error) -> Self {
        StoreError::Io(err)
    }
}

/// A flat JSON file acting as an ad-hoc collection of `T`.
///
/// Every operation reads the whole file, filters or rewrites in memory,
/// and writes the whole file back. Identifier filters use exact string
/// equality, everywhere.
///
/// Concurrency contract: an in-process async mutex serializes all
/// operations on one collection. Across processes the file is
/// last-write-wins with no locking, and there are no transactions
/// across collections.
pub struct JsonCollection<T> {
    path: PathBuf,
    lock: Mutex<()>,
    _entity: PhantomData<T>,
}

impl<T: Entity> JsonCollection<T> {
    /// Binds a collection to `<dir>/<name>.json`. The file is created
    /// lazily on first write; a missing file reads as an empty collection.
    pub fn new(dir: impl AsRef<Path>, name: &str) -> Self {
        Self {
            path: dir.as_ref().join(format!("{}.json", name)),
            lock: Mutex::new(()),
            _entity: PhantomData,
        }
    }

    async fn read_file(&self) -> Result<Vec<T>, StoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::Io(e)),
        };
        if bytes.iter().all(|b| b.is_ascii_whitespace()) {
            return Ok(Vec::new());
        }
        serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt {
            file: self.path.clone(),
            source,
        })
    }

    async fn write_file(&self, items: &[T]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_vec_pretty(items).map_err(|source| StoreError::Corrupt {
            file: self.path.clone(),
            source,
        })?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }

    pub async fn find_all(&self) -> Result<Vec<T>, StoreError> {
        let _guard = self.lock.lock().await;
        self.read_file().await
    }

    /// Returns all entities matching the predicate, in file order.
    pub async fn find<F>(&self, pred: F) -> Result<Vec<T>, StoreError>
    where
        F: Fn(&T) -> bool,
    {
        let _guard = self.lock.lock().await;
        let items = self.read_file().await?;
        Ok(items.into_iter().filter(|item| pred(item)).collect())
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<T>, StoreError> {
        let _guard = self.lock.lock().await;
        let items = self.read_file().await?;
        Ok(items.into_iter().find(|item| item.id() == id))
    }

    /// Inserts the entity, or replaces the stored one with the same id.
    pub async fn save(&self, entity: T) -> Result<T, StoreError> {
        let _guard = self.lock.lock().await;
        let mut items = self.read_file().await?;
        match items.iter_mut().find(|item| item.id() == entity.id()) {
            Some(slot) => *slot = entity.clone(),
            None => items.push(entity.clone()),
        }
        self.write_file(&items).await?;
        Ok(entity)
    }

    /// Bulk insert-or-replace with a single file rewrite.
    pub async fn save_all(&self, entities: Vec<T>) -> Result<Vec<T>, StoreError> {
        let _guard = self.lock.lock().await;
        let mut items = self.read_file().await?;
        for entity in &entities {
            match items.iter_mut().find(|item| item.id() == entity.id()) {
                Some(slot) => *slot = entity.clone(),
                None => items.push(entity.clone()),
            }
        }
        self.write_file(&items).await?;
        Ok(entities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Note {
        id: String,
        body: String,
    }

    impl Entity for Note {
        fn id(&self) -> &str {
            &self.id
        }
    }

    fn note(id: &str, body: &str) -> Note {
        Note {
            id: id.to_string(),
            body: body.to_string(),
        }
    }

    #[tokio::test]
    async fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let coll: JsonCollection<Note> = JsonCollection::new(dir.path(), "notes");

        assert!(coll.find_all().await.unwrap().is_empty());
        assert!(coll.find_by_id("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_then_find_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let coll: JsonCollection<Note> = JsonCollection::new(dir.path(), "notes");

        coll.save(note("1", "first")).await.unwrap();
        coll.save(note("2", "second")).await.unwrap();

        let all = coll.find_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(coll.find_by_id("2").await.unwrap().unwrap().body, "second");

        let matched = coll.find(|n| n.body.contains("fir")).await.unwrap();
        assert_eq!(matched, vec![note("1", "first")]);
    }

    #[tokio::test]
    async fn save_replaces_existing_id_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let coll: JsonCollection<Note> = JsonCollection::new(dir.path(), "notes");

        coll.save(note("1", "old")).await.unwrap();
        coll.save(note("1", "new")).await.unwrap();

        let all = coll.find_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].body, "new");
    }

    #[tokio::test]
    async fn save_all_writes_every_entity() {
        let dir = tempfile::tempdir().unwrap();
        let coll: JsonCollection<Note> = JsonCollection::new(dir.path(), "notes");

        coll.save(note("1", "kept")).await.unwrap();
        coll.save_all(vec![note("2", "a"), note("3", "b")])
            .await
            .unwrap();

        assert_eq!(coll.find_all().await.unwrap().len(), 3);
    }
}
