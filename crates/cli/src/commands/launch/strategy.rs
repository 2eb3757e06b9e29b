pub mod direct;
pub mod shell_window;
pub mod uri;

use std::process::Command;

pub use self::{direct::DirectLaunchStrategy, shell_window::ShellWindowStrategy, uri::UriStrategy};

/// Builds the command(s) for one launch step.
///
/// When more than one command is returned they are alternatives, tried in order until one of
/// them starts.
pub trait LaunchStrategy {
    fn build_commands(self) -> Vec<Command>;
}

#[cfg(target_os = "windows")]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

/// `cmd.exe /c start "<title>" "<target>"` without a console of its own.
#[cfg(target_os = "windows")]
fn cmd_start(title: &str, target: &std::ffi::OsStr) -> Command {
    use std::os::windows::process::CommandExt;

    let mut command = Command::new("cmd.exe");
    command
        .raw_arg(format!(
            "/c start \"{title}\" \"{}\"",
            target.to_string_lossy()
        ))
        .creation_flags(CREATE_NO_WINDOW);

    command
}
