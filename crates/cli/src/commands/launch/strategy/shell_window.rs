use std::{
    path::{Path, PathBuf},
    process::Command,
};

use crate::commands::launch::strategy::LaunchStrategy;

/// Run a script in a new terminal window with the given title.
#[derive(Debug)]
pub struct ShellWindowStrategy {
    script: PathBuf,
    title: String,
    working_dir: PathBuf,
}

impl ShellWindowStrategy {
    pub fn new(
        script: impl Into<PathBuf>,
        title: impl Into<String>,
        working_dir: impl AsRef<Path>,
    ) -> Self {
        Self {
            script: script.into(),
            title: title.into(),
            working_dir: working_dir.as_ref().to_path_buf(),
        }
    }
}

impl LaunchStrategy for ShellWindowStrategy {
    #[cfg(target_os = "windows")]
    fn build_commands(self) -> Vec<Command> {
        let mut command = super::cmd_start(&self.title, self.script.as_os_str());
        command.current_dir(self.working_dir);

        vec![command]
    }

    #[cfg(not(target_os = "windows"))]
    fn build_commands(self) -> Vec<Command> {
        let mut command = Command::new("x-terminal-emulator");
        command
            .arg("-T")
            .arg(&self.title)
            .arg("-e")
            .arg(&self.script)
            .current_dir(self.working_dir);

        vec![command]
    }
}

#[cfg(all(test, not(target_os = "windows")))]
mod test {
    use std::{ffi::OsStr, path::Path};

    use super::ShellWindowStrategy;
    use crate::commands::launch::strategy::LaunchStrategy;

    #[test]
    fn opens_titled_terminal_in_install_dir() {
        let commands = ShellWindowStrategy::new(
            "/games/peacock/Start Server.cmd",
            "Hitman Local Server",
            "/games/peacock",
        )
        .build_commands();

        assert_eq!(1, commands.len());

        let command = &commands[0];
        let args: Vec<&OsStr> = command.get_args().collect();

        assert_eq!("x-terminal-emulator", command.get_program());
        assert_eq!(
            vec![
                OsStr::new("-T"),
                OsStr::new("Hitman Local Server"),
                OsStr::new("-e"),
                OsStr::new("/games/peacock/Start Server.cmd"),
            ],
            args
        );
        assert_eq!(Some(Path::new("/games/peacock")), command.get_current_dir());
    }
}
