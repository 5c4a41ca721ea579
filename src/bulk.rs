use crate::{compress_file, Error, Outcome, WorkItem, DEVICE};
use crossbeam::channel;
use crossbeam::deque::{Injector, Steal};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, warn};
/// Work done for a single item on a worker thread.
type Job = fn(&WorkItem, bool) -> Result<(), Error>;
/// Custom configuration for building a Parallel.
#[derive(Debug, Clone)]
pub struct ParallelBuilder {
    vec: Vec<WorkItem>,
    device_num: usize,
    preserve_metadata: bool,
    job: Job,
}
impl ParallelBuilder {
    /// Specifies the number of threads to be used.
    /// Defaults to 4. Zero is treated as one.
    pub fn with_device(self, device_num: usize) -> ParallelBuilder {
        ParallelBuilder { device_num, ..self }
    }
    /// Whether EXIF and ICC data are carried over. Defaults to true.
    pub fn with_metadata(self, preserve_metadata: bool) -> ParallelBuilder {
        ParallelBuilder {
            preserve_metadata,
            ..self
        }
    }
    #[cfg(test)]
    fn with_job(self, job: Job) -> ParallelBuilder {
        ParallelBuilder { job, ..self }
    }
    /// Builds a new Parallel.
    pub fn build(self) -> Parallel {
        // no point in idle threads
        let device_num = self.device_num.min(self.vec.len()).max(1);
        Parallel {
            vec: self.vec,
            device_num,
            preserve_metadata: self.preserve_metadata,
            job: self.job,
        }
    }
}
/// A fixed-size pool of worker threads compressing a batch of [`WorkItem`]s.
///
/// Every submitted item is attempted exactly once and yields exactly one [`Outcome`].
/// A failing item, including one that panics inside the codec, never stops the others.
#[derive(Debug)]
pub struct Parallel {
    vec: Vec<WorkItem>,
    device_num: usize,
    preserve_metadata: bool,
    job: Job,
}
impl Parallel {
    /// Creates a new ParallelBuilder.
    pub fn from_vec(vec: Vec<WorkItem>) -> ParallelBuilder {
        ParallelBuilder {
            vec,
            device_num: DEVICE,
            preserve_metadata: true,
            job: compress_file,
        }
    }
    /// Amount of worker threads this pool will spawn.
    pub fn device_num(&self) -> usize {
        self.device_num
    }
    /// Runs the batch to completion and returns every outcome in completion order.
    pub fn run(self) -> Vec<Outcome> {
        self.into_iter().collect()
    }
    fn spawn(self) -> (channel::Receiver<Outcome>, Vec<JoinHandle<()>>) {
        let queue = Arc::new(Injector::new());
        for item in self.vec {
            queue.push(item);
        }
        let (tx, rx) = channel::unbounded();
        let mut handles = Vec::with_capacity(self.device_num);
        for id in 0..self.device_num {
            let local_queue = Arc::clone(&queue);
            let local_transmitter = tx.clone();
            let preserve_metadata = self.preserve_metadata;
            let job = self.job;
            let handle = thread::spawn(move || {
                debug!(worker = id, "worker started");
                loop {
                    let item = match local_queue.steal() {
                        Steal::Success(item) => item,
                        Steal::Retry => continue,
                        Steal::Empty => break,
                    };
                    let outcome = process(item, job, preserve_metadata);
                    if !outcome.is_success() {
                        warn!(worker = id, "{outcome}");
                    }
                    if local_transmitter.send(outcome).is_err() {
                        // nobody is listening anymore
                        break;
                    }
                }
                debug!(worker = id, "worker exited");
            });
            handles.push(handle);
        }
        // workers hold the remaining senders; the channel closes when the last one exits.
        drop(tx);
        (rx, handles)
    }
}
/// Compresses one item, turning any error or panic into a failed [`Outcome`].
fn process(item: WorkItem, job: Job, preserve_metadata: bool) -> Outcome {
    let result = panic::catch_unwind(AssertUnwindSafe(|| job(&item, preserve_metadata)))
        .unwrap_or_else(|payload| Err(Error::Codec(panic_message(payload.as_ref()))));
    Outcome::new(item, result)
}
fn panic_message(payload: &(dyn Any + Send)) -> String {
    let msg = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown cause".to_string());
    format!("codec panicked: {msg}")
}
impl IntoIterator for Parallel {
    type Item = Outcome;
    type IntoIter = ParallelIntoIterator;
    fn into_iter(self) -> Self::IntoIter {
        let (recv, handles) = self.spawn();
        ParallelIntoIterator { recv, handles }
    }
}
/// Yields [`Outcome`]s as workers finish them.
///
/// Order follows completion, not submission. The iterator ends once every
/// worker has exited, and joins them before doing so.
pub struct ParallelIntoIterator {
    recv: channel::Receiver<Outcome>,
    handles: Vec<JoinHandle<()>>,
}
impl Iterator for ParallelIntoIterator {
    type Item = Outcome;
    fn next(&mut self) -> Option<Self::Item> {
        if let Ok(outcome) = self.recv.recv() {
            return Some(outcome);
        }
        for handle in self.handles.drain(..) {
            if handle.join().is_err() {
                warn!("a worker thread panicked outside of compression");
            }
        }
        None
    }
}
