use crate::{BatchSummary, Config, Error, Outcome, Parallel, Tasks};
use tracing::{debug, info};
/// Owns one run: enumerate the source, compress everything on the pool, summarize.
#[derive(Debug, Clone)]
pub struct Batch {
    config: Config,
}
impl Batch {
    /// Creates a new Batch.
    pub fn new(config: Config) -> Self {
        Self { config }
    }
    /// Configuration this batch runs with.
    pub fn config(&self) -> &Config {
        &self.config
    }
    /// Runs the batch, calling `on_outcome` once per item in the order items complete.
    ///
    /// Returns an error only when the run cannot start: invalid configuration,
    /// unreadable source, or an output directory that cannot be created. Nothing has
    /// been compressed in that case. Failures of single items end up in the summary.
    pub fn run<F>(&self, mut on_outcome: F) -> Result<BatchSummary, Error>
    where
        F: FnMut(&Outcome),
    {
        self.config.validate()?;
        let items = Tasks::enumerate(&self.config)?;
        let pool = Parallel::from_vec(items)
            .with_device(self.config.workers())
            .with_metadata(self.config.preserve_metadata())
            .build();
        info!(
            source = %self.config.source().display(),
            workers = pool.device_num(),
            quality = self.config.quality(),
            "starting batch"
        );
        let mut summary = BatchSummary::default();
        for outcome in pool {
            debug!(success = outcome.is_success(), "{outcome}");
            on_outcome(&outcome);
            summary.record(&outcome);
        }
        let summary = summary.finish();
        info!(
            total = summary.total,
            succeeded = summary.succeeded,
            failed = summary.failed,
            "batch finished"
        );
        Ok(summary)
    }
    /// Like [`Batch::run`], reporting progress through `tracing` only.
    pub fn run_logged(&self) -> Result<BatchSummary, Error> {
        self.run(|outcome| info!("{outcome}"))
    }
}
