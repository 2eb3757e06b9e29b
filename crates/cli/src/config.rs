use std::path::Path;

use peacock_options::OptionsDir;

pub mod known_paths;

pub use known_paths::KnownDirs;

#[derive(Debug, clap::Args, Default)]
pub struct Options {
    /// Override the folder containing options.json [default: <launcher folder>/config]
    #[clap(long, global = true, help_heading = "Configuration", value_hint = clap::ValueHint::DirPath)]
    pub(crate) config_dir: Option<Box<Path>>,

    /// Exit straight away on errors instead of waiting for Enter.
    #[clap(long, global = true, help_heading = "Configuration")]
    pub(crate) no_pause: bool,
}

pub struct Config {
    pub options: Options,
    pub known_dirs: KnownDirs,
}

impl Config {
    pub fn config_dir(&self) -> Option<Box<Path>> {
        self.options
            .config_dir
            .clone()
            .or_else(|| self.known_dirs.config_dir())
    }

    pub fn options_dir(&self) -> Option<OptionsDir> {
        self.config_dir().map(OptionsDir::new)
    }

    pub fn log_dir(&self) -> Option<Box<Path>> {
        self.known_dirs.log_dir()
    }

    pub fn pause_on_error(&self) -> bool {
        !self.options.no_pause
    }
}
