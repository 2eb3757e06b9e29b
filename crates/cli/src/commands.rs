use clap::*;
use launch::LaunchArgs;

pub mod info;
pub mod launch;
pub mod schema;

#[derive(Subcommand, Debug)]
#[command(flatten_help = true)]
pub enum Commands {
    /// Start the patcher, the server and the game (the default when no command is given).
    #[clap(disable_version_flag = true)]
    Launch(LaunchArgs),

    /// Show where the launcher looks for its files and what it found there.
    #[clap(disable_version_flag = true)]
    Info,

    /// Print the JSON schema of options.json.
    #[clap(disable_version_flag = true)]
    Schema,
}

impl Default for Commands {
    fn default() -> Self {
        Self::Launch(LaunchArgs::default())
    }
}
