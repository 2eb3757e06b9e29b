use std::{
    path::{Path, PathBuf},
    process::Command,
};

use crate::commands::launch::strategy::LaunchStrategy;

/// Run an executable as-is.
#[derive(Debug)]
pub struct DirectLaunchStrategy {
    exe: PathBuf,
    working_dir: PathBuf,
}

impl DirectLaunchStrategy {
    pub fn new(exe: impl Into<PathBuf>, working_dir: impl AsRef<Path>) -> Self {
        Self {
            exe: exe.into(),
            working_dir: working_dir.as_ref().to_path_buf(),
        }
    }
}

impl LaunchStrategy for DirectLaunchStrategy {
    fn build_commands(self) -> Vec<Command> {
        let mut command = Command::new(self.exe);
        command.current_dir(self.working_dir);

        vec![command]
    }
}
