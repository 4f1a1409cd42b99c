use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// A throwaway SQLite file under the system temp dir.
pub struct TempDb {
    pub path: PathBuf,
}

impl TempDb {
    pub fn new(label: &str) -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before UNIX_EPOCH")
            .as_nanos();

        let mut path = std::env::temp_dir();
        path.push(format!(
            "itembox-{label}-{}-{}.sqlite",
            std::process::id(),
            nanos
        ));
        Self { path }
    }

    pub fn url(&self) -> String {
        format!("sqlite:{}", self.path.display())
    }

    pub async fn store(&self) -> itembox::db::DbActorHandle {
        itembox::db::spawn(&self.url())
            .await
            .expect("failed to spawn DbActor")
    }
}

impl Drop for TempDb {
    fn drop(&mut self) {
        remove_sqlite_files(&self.path);
    }
}

fn remove_sqlite_files(path: &Path) {
    let wal = PathBuf::from(format!("{}-wal", path.to_string_lossy()));
    let shm = PathBuf::from(format!("{}-shm", path.to_string_lossy()));
    let _ = std::fs::remove_file(wal);
    let _ = std::fs::remove_file(shm);
    let _ = std::fs::remove_file(path);
}
