use crate::{Error, WorkItem};
use std::fmt;
use std::path::PathBuf;
/// Terminal result of processing one [`WorkItem`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    item: WorkItem,
    result: Result<(), Error>,
}
impl Outcome {
    /// Creates a new Outcome.
    pub fn new(item: WorkItem, result: Result<(), Error>) -> Self {
        Self { item, result }
    }
    /// The item this outcome belongs to.
    pub fn item(&self) -> &WorkItem {
        &self.item
    }
    /// Success, or the error that failed the item.
    pub fn result(&self) -> &Result<(), Error> {
        &self.result
    }
    /// Returns true if the item was compressed and written.
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
    /// Human-readable failure reason, if any.
    pub fn reason(&self) -> Option<String> {
        self.result.as_ref().err().map(ToString::to_string)
    }
}
impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self
            .item
            .input_path()
            .file_name()
            .unwrap_or_default()
            .to_string_lossy();
        match &self.result {
            Ok(()) => write!(
                f,
                "done: {} -> {}",
                name,
                self.item.output_path().display()
            ),
            Err(e) => write!(f, "failed: {name}: {e}"),
        }
    }
}
/// Counts of a finished batch plus every failed input with its reason.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Outcomes recorded.
    pub total: usize,
    /// Items written successfully.
    pub succeeded: usize,
    /// Items that failed.
    pub failed: usize,
    /// Failed inputs and why, sorted by input path once finished.
    pub failures: Vec<(PathBuf, String)>,
}
impl BatchSummary {
    /// Adds one outcome to the tally.
    pub fn record(&mut self, outcome: &Outcome) {
        self.total += 1;
        match outcome.reason() {
            None => self.succeeded += 1,
            Some(reason) => {
                self.failed += 1;
                self.failures
                    .push((outcome.item().input_path().to_path_buf(), reason));
            }
        }
    }
    /// Orders failures so the summary does not depend on completion order.
    pub fn finish(mut self) -> Self {
        self.failures.sort();
        self
    }
    /// Returns true if no item failed.
    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }
}
