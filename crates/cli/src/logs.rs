use std::{
    fs,
    path::{Path, PathBuf},
    time::SystemTime,
};

use chrono::Local;

pub struct LogsDb {
    base_dir: Box<Path>,
    retention: usize,
}

impl LogsDb {
    pub fn new<P: Into<Box<Path>>>(path: P) -> Self {
        Self {
            base_dir: path.into(),
            retention: 5,
        }
    }

    /// Pick the path for this run's log file, deleting the oldest log if the directory is full.
    pub fn create_log_file(&self) -> color_eyre::Result<Box<Path>> {
        fs::create_dir_all(&self.base_dir)?;

        let mut log_files: Vec<(SystemTime, PathBuf)> = fs::read_dir(&self.base_dir)
            .map(|dir| {
                dir.filter_map(|entry| {
                    let entry = entry.ok()?;
                    let metadata = entry.metadata().ok()?;
                    if metadata.is_file()
                        && entry.path().extension().is_some_and(|ext| ext == "log")
                    {
                        Some((metadata.modified().ok()?, entry.path()))
                    } else {
                        None
                    }
                })
                .collect()
            })
            .unwrap_or_default();

        log_files.sort_by_key(|(time, _)| *time);

        let excess = (log_files.len() + 1).saturating_sub(self.retention);
        for (_, path_to_delete) in log_files.iter().take(excess) {
            let _ = fs::remove_file(path_to_delete);
        }

        let now = Local::now();
        let log_file_suffix = now.format("%Y-%m-%d_%H-%M-%S").to_string();
        let mut log_file_path = self.base_dir.join(format!("{log_file_suffix}.log"));

        // Runs started within the same second get a counter instead of truncating each other.
        let mut attempt = 1;
        while log_file_path.exists() {
            log_file_path = self
                .base_dir
                .join(format!("{log_file_suffix}-{attempt}.log"));
            attempt += 1;
        }

        Ok(log_file_path.into_boxed_path())
    }
}

#[cfg(test)]
mod test {
    use std::{error::Error, fs};

    use assert_fs::prelude::{FileTouch, PathChild};

    use super::LogsDb;

    #[test]
    fn keeps_at_most_retention_logs() -> Result<(), Box<dyn Error>> {
        let temp_dir = assert_fs::TempDir::new()?;
        for day in 1..=5 {
            temp_dir.child(format!("2026-01-0{day}_00-00-00.log")).touch()?;
        }
        temp_dir.child("notes.txt").touch()?;

        let db = LogsDb::new(temp_dir.path());
        let log_file = db.create_log_file()?;

        let remaining_logs = fs::read_dir(temp_dir.path())?
            .filter_map(Result::ok)
            .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "log"))
            .count();

        assert_eq!(4, remaining_logs);
        assert!(temp_dir.child("notes.txt").path().exists());
        assert_eq!(Some(temp_dir.path()), log_file.parent());
        Ok(())
    }

    #[test]
    fn runs_in_the_same_second_get_distinct_logs() -> Result<(), Box<dyn Error>> {
        let temp_dir = assert_fs::TempDir::new()?;
        let db = LogsDb::new(temp_dir.path());

        let first = db.create_log_file()?;
        fs::write(&first, "first run")?;

        let second = db.create_log_file()?;

        assert_ne!(first, second);
        assert!(!second.exists());
        assert_eq!("first run", fs::read_to_string(&first)?);
        Ok(())
    }

    #[test]
    fn creates_missing_log_dir() -> Result<(), Box<dyn Error>> {
        let temp_dir = assert_fs::TempDir::new()?;
        let logs = temp_dir.child("logs");

        let log_file = LogsDb::new(logs.path()).create_log_file()?;

        assert!(logs.path().is_dir());
        assert!(log_file.extension().is_some_and(|ext| ext == "log"));
        Ok(())
    }
}
