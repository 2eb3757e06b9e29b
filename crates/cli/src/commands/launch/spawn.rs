use std::{
    io,
    process::{Command, Stdio},
    thread,
    time::Duration,
};

use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Spawned {
    /// The process is running on its own and will not be waited on.
    Detached { pid: u32 },

    /// Nothing was started; the command was only reported.
    Planned,
}

pub trait Spawner {
    fn spawn(&mut self, command: Command) -> io::Result<Spawned>;
}

impl<S: Spawner + ?Sized> Spawner for &mut S {
    fn spawn(&mut self, command: Command) -> io::Result<Spawned> {
        (**self).spawn(command)
    }
}

impl<S: Spawner + ?Sized> Spawner for Box<S> {
    fn spawn(&mut self, command: Command) -> io::Result<Spawned> {
        (**self).spawn(command)
    }
}

/// Start the process and forget about it. The child outlives the launcher.
#[derive(Debug, Default)]
pub struct DetachedSpawner;

impl Spawner for DetachedSpawner {
    fn spawn(&mut self, mut command: Command) -> io::Result<Spawned> {
        command
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        // Keep Ctrl+C in the launcher's console from reaching the child.
        #[cfg(unix)]
        std::os::unix::process::CommandExt::process_group(&mut command, 0);

        let child = command.spawn()?;
        let pid = child.id();
        debug!(pid, "process detached");

        Ok(Spawned::Detached { pid })
    }
}

/// Print each command instead of running it.
#[derive(Debug, Default)]
pub struct DryRunSpawner;

impl Spawner for DryRunSpawner {
    fn spawn(&mut self, command: Command) -> io::Result<Spawned> {
        println!("Would run: {command:?}");

        Ok(Spawned::Planned)
    }
}

pub trait Delay {
    fn wait(&mut self, duration: Duration);
}

impl<D: Delay + ?Sized> Delay for &mut D {
    fn wait(&mut self, duration: Duration) {
        (**self).wait(duration)
    }
}

impl<D: Delay + ?Sized> Delay for Box<D> {
    fn wait(&mut self, duration: Duration) {
        (**self).wait(duration)
    }
}

#[derive(Debug, Default)]
pub struct ThreadSleep;

impl Delay for ThreadSleep {
    fn wait(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}

/// Skip every wait. Used for `--no-wait` and dry runs.
#[derive(Debug, Default)]
pub struct NoDelay;

impl Delay for NoDelay {
    fn wait(&mut self, duration: Duration) {
        debug!(?duration, "skipping wait");
    }
}
