pub mod spawn;
pub mod strategy;

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use clap::{ArgAction, Args};
use color_eyre::eyre::OptionExt;
use peacock_options::{LaunchOptions, Loaded, OptionsDir, OptionsError};
use tracing::{error, info, warn};

use crate::{
    commands::launch::{
        spawn::{Delay, DetachedSpawner, DryRunSpawner, NoDelay, Spawned, Spawner, ThreadSleep},
        strategy::{DirectLaunchStrategy, LaunchStrategy, ShellWindowStrategy, UriStrategy},
    },
    config::Config,
    output::OutputBuilder,
};

/// How long the first-run guidance stays on screen.
pub const BOOTSTRAP_DELAY: Duration = Duration::from_secs(15);

/// Time given to the patcher before the server starts.
pub const PATCHER_SETTLE_DELAY: Duration = Duration::from_secs(3);

/// Time given to the server before the game starts.
pub const SERVER_SETTLE_DELAY: Duration = Duration::from_secs(2);

#[derive(Args, Debug, Default)]
pub struct LaunchArgs {
    /// Print the commands that would be run instead of running them.
    #[clap(long, action = ArgAction::SetTrue)]
    dry_run: bool,

    /// Don't wait between steps or before exiting.
    #[clap(long, action = ArgAction::SetTrue)]
    no_wait: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Started { pid: u32 },
    Planned,
    Missing(PathBuf),
    Failed(String),
}

impl StepOutcome {
    pub fn is_launched(&self) -> bool {
        matches!(self, Self::Started { .. } | Self::Planned)
    }
}

impl From<Spawned> for StepOutcome {
    fn from(spawned: Spawned) -> Self {
        match spawned {
            Spawned::Detached { pid } => Self::Started { pid },
            Spawned::Planned => Self::Planned,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LaunchReport {
    pub patcher: StepOutcome,
    pub server: StepOutcome,
    pub game: StepOutcome,
    pub close_delay: Duration,
}

impl LaunchReport {
    /// Number of steps that were skipped or failed to start.
    pub fn warnings(&self) -> usize {
        [&self.patcher, &self.server, &self.game]
            .into_iter()
            .filter(|outcome| !outcome.is_launched())
            .count()
    }
}

#[derive(Debug)]
pub enum Outcome {
    /// First run: default options were written and nothing was launched.
    Bootstrapped { options_path: PathBuf },

    Launched(LaunchReport),
}

pub struct Sequencer<S, D> {
    spawner: S,
    delay: D,
}

impl<S: Spawner, D: Delay> Sequencer<S, D> {
    pub fn new(spawner: S, delay: D) -> Self {
        Self { spawner, delay }
    }

    /// Load (or on first run, create) the options in `dir` and run the launch sequence.
    ///
    /// Errors are only returned for problems with the options themselves. Launch problems are
    /// logged and recorded in the [`LaunchReport`].
    pub fn run(&mut self, dir: &OptionsDir) -> Result<Outcome, OptionsError> {
        match dir.load_or_bootstrap()? {
            Loaded::Bootstrapped(options_path) => {
                println!("No configuration file found.");
                println!(
                    "A default configuration has been written to:\n  {}",
                    options_path.display()
                );
                println!("Edit it with the correct paths and settings, then run the launcher again.");
                println!(
                    "This window will close in {} seconds...",
                    BOOTSTRAP_DELAY.as_secs()
                );

                self.delay.wait(BOOTSTRAP_DELAY);

                Ok(Outcome::Bootstrapped { options_path })
            }
            Loaded::Existing(options) => {
                print_options(&dir.options_path(), &options);

                Ok(Outcome::Launched(self.launch(&options)))
            }
        }
    }

    pub fn launch(&mut self, options: &LaunchOptions) -> LaunchReport {
        let patcher = self.launch_patcher(options);
        let server = self.launch_server(options);
        let game = self.launch_game(options);

        let close_delay = options.close_delay();
        if !close_delay.is_zero() {
            println!(
                "Waiting {} second(s) before closing the launcher...",
                close_delay.as_secs()
            );
            self.delay.wait(close_delay);
        }

        LaunchReport {
            patcher,
            server,
            game,
            close_delay,
        }
    }

    #[tracing::instrument(skip_all)]
    fn launch_patcher(&mut self, options: &LaunchOptions) -> StepOutcome {
        let path = options.patcher_path();

        if !path.is_file() {
            warn!(?path, "patcher executable not found, skipping");
            return StepOutcome::Missing(path);
        }

        println!("Starting patcher: {}", path.display());

        let outcome = self.start(DirectLaunchStrategy::new(&path, options.install_dir()));
        if let StepOutcome::Failed(error) = &outcome {
            error!(?path, %error, "couldn't start the patcher");
        } else {
            self.delay.wait(PATCHER_SETTLE_DELAY);
        }

        outcome
    }

    #[tracing::instrument(skip_all)]
    fn launch_server(&mut self, options: &LaunchOptions) -> StepOutcome {
        let path = options.server_cmd_path();

        if !path.is_file() {
            warn!(?path, "server script not found, skipping");
            return StepOutcome::Missing(path);
        }

        println!(
            "Starting server script in a window titled \"{}\": {}",
            options.server_window_title,
            path.display()
        );

        let outcome = self.start(ShellWindowStrategy::new(
            &path,
            &options.server_window_title,
            options.install_dir(),
        ));

        if let StepOutcome::Failed(error) = &outcome {
            error!(?path, %error, "couldn't start the server script");
        } else {
            self.delay.wait(SERVER_SETTLE_DELAY);
        }

        outcome
    }

    #[tracing::instrument(skip_all)]
    fn launch_game(&mut self, options: &LaunchOptions) -> StepOutcome {
        println!("Launching HITMAN through the Epic Games Launcher...");

        let outcome = self.start(UriStrategy::new(&options.epic_uri));
        if let StepOutcome::Failed(error) = &outcome {
            error!(uri = %options.epic_uri, %error, "couldn't open the launcher URI");
        }

        outcome
    }

    /// Try each candidate command until one starts.
    fn start(&mut self, strategy: impl LaunchStrategy) -> StepOutcome {
        let mut last_error = None;

        for command in strategy.build_commands() {
            info!(?command, "spawning");

            match self.spawner.spawn(command) {
                Ok(spawned) => return spawned.into(),
                Err(error) => {
                    warn!(%error, "command failed to start");
                    last_error = Some(error);
                }
            }
        }

        StepOutcome::Failed(
            last_error
                .map(|error| error.to_string())
                .unwrap_or_else(|| "no command available for this platform".to_owned()),
        )
    }
}

fn print_options(path: &Path, options: &LaunchOptions) {
    let mut output = OutputBuilder::new(format!("Configuration loaded from {}", path.display()));

    output.property("PeacockFolder", &options.peacock_folder);
    output.property("PatcherExe", &options.patcher_exe);
    output.property("ServerCmd", &options.server_cmd);
    output.property("ServerWindowTitle", &options.server_window_title);
    output.property("EpicUri", &options.epic_uri);
    output.property("CloseDelaySeconds", options.close_delay_seconds);

    println!("{}", output.build());
}

#[tracing::instrument(skip_all)]
pub fn launch(config: Config, args: LaunchArgs) -> color_eyre::Result<()> {
    let options_dir = config
        .options_dir()
        .ok_or_eyre("unable to determine the folder containing options.json")?;

    let spawner: Box<dyn Spawner> = if args.dry_run {
        Box::new(DryRunSpawner)
    } else {
        Box::new(DetachedSpawner)
    };

    let delay: Box<dyn Delay> = if args.dry_run || args.no_wait {
        Box::new(NoDelay)
    } else {
        Box::new(ThreadSleep)
    };

    match Sequencer::new(spawner, delay).run(&options_dir)? {
        Outcome::Bootstrapped { options_path } => {
            info!(?options_path, "first run, nothing launched");
        }
        Outcome::Launched(report) => {
            info!(
                warnings = report.warnings(),
                close_delay = ?report.close_delay,
                ?report,
                "launch sequence finished"
            );
        }
    }

    Ok(())
}
