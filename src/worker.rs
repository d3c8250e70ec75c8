use std::io;
use std::thread;

pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// Where lookups run. The app uses a thread per job; tests run jobs inline.
///
/// An `Err` means the job was dropped without running.
pub trait Spawn {
    fn spawn(&self, name: &str, job: Job) -> io::Result<()>;
}

/// One short-lived named thread per job.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSpawner;

impl Spawn for ThreadSpawner {
    fn spawn(&self, name: &str, job: Job) -> io::Result<()> {
        thread::Builder::new().name(name.to_string()).spawn(job)?;
        Ok(())
    }
}

/// Runs the job on the calling thread before returning.
#[derive(Debug, Default, Clone, Copy)]
pub struct InlineSpawner;

impl Spawn for InlineSpawner {
    fn spawn(&self, _name: &str, job: Job) -> io::Result<()> {
        job();
        Ok(())
    }
}
