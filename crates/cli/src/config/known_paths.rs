use std::path::{Path, PathBuf};

#[derive(Debug, Default)]
pub struct KnownDirs {
    /// The current working directory we launched from.
    cwd: Option<Box<Path>>,

    /// The directory containing the binary we launched.
    exe_dir: Option<Box<Path>>,
}

pub trait OptionalPathExt {
    fn join<P>(&self, path: P) -> Option<Box<Path>>
    where
        P: AsRef<Path>;
}

impl<S: AsRef<Path>> OptionalPathExt for Option<S> {
    fn join<P>(&self, path: P) -> Option<Box<Path>>
    where
        P: AsRef<Path>,
    {
        self.as_ref()
            .map(|parent| parent.as_ref().join(path).into_boxed_path())
    }
}

impl KnownDirs {
    pub fn discover() -> Self {
        Self {
            cwd: std::env::current_dir()
                .map(|cwd| cwd.into_boxed_path())
                .ok(),
            exe_dir: std::env::current_exe()
                .ok()
                .and_then(|exe| exe.parent().map(Path::to_path_buf))
                .map(PathBuf::into_boxed_path),
        }
    }

    #[cfg(test)]
    pub fn at<P: AsRef<Path>>(exe_dir: P) -> Self {
        Self {
            cwd: None,
            exe_dir: Some(Box::from(exe_dir.as_ref())),
        }
    }

    pub fn exe_dir(&self) -> Option<&Path> {
        self.exe_dir.as_deref()
    }

    /// Discover the directory holding `options.json`. This is always `config` next to the
    /// launcher binary, so the launcher can be moved around together with its settings.
    pub fn config_dir(&self) -> Option<Box<Path>> {
        self.exe_dir.join("config")
    }

    /// Discover the directory log files are written to.
    ///
    /// This is `logs` next to the launcher binary, or the current directory when the binary
    /// location can't be determined.
    pub fn log_dir(&self) -> Option<Box<Path>> {
        self.exe_dir.join("logs").or_else(|| self.cwd.clone())
    }
}
