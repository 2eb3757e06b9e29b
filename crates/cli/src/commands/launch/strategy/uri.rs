use std::process::Command;

use crate::commands::launch::strategy::LaunchStrategy;

/// Hand a URI to the platform's default handler.
#[derive(Debug)]
pub struct UriStrategy {
    uri: String,
}

impl UriStrategy {
    pub fn new(uri: impl Into<String>) -> Self {
        Self { uri: uri.into() }
    }
}

impl LaunchStrategy for UriStrategy {
    #[cfg(target_os = "windows")]
    fn build_commands(self) -> Vec<Command> {
        vec![super::cmd_start("", std::ffi::OsStr::new(&self.uri))]
    }

    #[cfg(not(target_os = "windows"))]
    fn build_commands(self) -> Vec<Command> {
        open::commands(&self.uri)
    }
}

#[cfg(all(test, not(target_os = "windows")))]
mod test {
    use std::ffi::OsStr;

    use super::UriStrategy;
    use crate::commands::launch::strategy::LaunchStrategy;

    #[test]
    fn candidates_receive_the_uri() {
        let uri = "com.epicgames.launcher://apps/hitman?action=launch&silent=true";
        let commands = UriStrategy::new(uri).build_commands();

        assert!(!commands.is_empty());
        assert!(
            commands
                .iter()
                .any(|command| command.get_args().any(|arg| arg == OsStr::new(uri))),
            "no candidate passes the URI: {commands:?}"
        );
    }
}
