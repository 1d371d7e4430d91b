use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use yomu_lib::prelude::MangaInfo;

use crate::domain::{
    entities::session::Session,
    repositories::state::{History, StateRepository, StateRepositoryError},
};

const FAVORITES: &str = "favorites.json";
const HISTORY: &str = "history.json";
const SESSION: &str = "session.json";

/// One JSON document per blob under `path`
#[derive(Clone)]
pub struct JsonStateRepository {
    path: PathBuf,
}

impl JsonStateRepository {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: PathBuf::new().join(path),
        }
    }

    async fn read<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>, StateRepositoryError> {
        let path = self.path.join(name);

        let encoded = match tokio::fs::read(&path).await {
            Ok(encoded) => encoded,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        Ok(Some(serde_json::from_slice(&encoded)?))
    }

    /// Written beside the target then renamed over it, readers never see half a file
    async fn write<T: Serialize + ?Sized>(
        &self,
        name: &str,
        value: &T,
    ) -> Result<(), StateRepositoryError> {
        tokio::fs::create_dir_all(&self.path).await?;

        let path = self.path.join(name);
        let tmp = self.path.join(format!("{name}.tmp"));

        let encoded = serde_json::to_vec_pretty(value)?;
        tokio::fs::write(&tmp, &encoded).await?;
        tokio::fs::rename(&tmp, &path).await?;

        Ok(())
    }

    async fn remove(&self, name: &str) -> Result<(), StateRepositoryError> {
        match tokio::fs::remove_file(self.path.join(name)).await {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl StateRepository for JsonStateRepository {
    async fn read_favorites(&self) -> Result<Vec<MangaInfo>, StateRepositoryError> {
        Ok(self.read(FAVORITES).await?.unwrap_or_default())
    }

    async fn write_favorites(&self, favorites: &[MangaInfo]) -> Result<(), StateRepositoryError> {
        self.write(FAVORITES, favorites).await
    }

    async fn read_history(&self) -> Result<History, StateRepositoryError> {
        Ok(self.read(HISTORY).await?.unwrap_or_default())
    }

    async fn write_history(&self, history: &History) -> Result<(), StateRepositoryError> {
        self.write(HISTORY, history).await
    }

    async fn read_session(&self) -> Result<Option<Session>, StateRepositoryError> {
        self.read(SESSION).await
    }

    async fn write_session(
        &self,
        session: Option<&Session>,
    ) -> Result<(), StateRepositoryError> {
        match session {
            Some(session) => self.write(SESSION, session).await,
            None => self.remove(SESSION).await,
        }
    }
}

#[derive(Default)]
struct MemoryState {
    favorites: Vec<MangaInfo>,
    history: History,
    session: Option<Session>,
}

/// Process-local state, clones share the same storage
#[derive(Clone, Default)]
pub struct MemoryStateRepository {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStateRepository {
    fn with<T>(&self, f: impl FnOnce(&mut MemoryState) -> T) -> T {
        let mut state = match self.state.lock() {
            Ok(state) => state,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&mut state)
    }
}

#[async_trait]
impl StateRepository for MemoryStateRepository {
    async fn read_favorites(&self) -> Result<Vec<MangaInfo>, StateRepositoryError> {
        Ok(self.with(|s| s.favorites.clone()))
    }

    async fn write_favorites(&self, favorites: &[MangaInfo]) -> Result<(), StateRepositoryError> {
        self.with(|s| s.favorites = favorites.to_vec());
        Ok(())
    }

    async fn read_history(&self) -> Result<History, StateRepositoryError> {
        Ok(self.with(|s| s.history.clone()))
    }

    async fn write_history(&self, history: &History) -> Result<(), StateRepositoryError> {
        self.with(|s| s.history = history.clone());
        Ok(())
    }

    async fn read_session(&self) -> Result<Option<Session>, StateRepositoryError> {
        Ok(self.with(|s| s.session.clone()))
    }

    async fn write_session(
        &self,
        session: Option<&Session>,
    ) -> Result<(), StateRepositoryError> {
        self.with(|s| s.session = session.cloned());
        Ok(())
    }
}
