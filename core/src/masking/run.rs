//! Masking run
//!
//! This module models the merge of freshly imported records into the store
//! as a long-running task: it reports incremental progress to an observer,
//! then performs the actual append as a single atomic step once progress
//! reaches completion. Readers of the store never see a partially-appended
//! state, and the run is not cancelable once started.

use log::{debug, info};

use crate::config::MaskingConfig;
use crate::error::{MaskError, Result};
use crate::models::Record;
use crate::store::RecordStore;
use super::engine::{MaskingEngine, MaskingOutcome};
use super::selection::MaskSelection;

/// Incremental progress of a masking run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressUpdate {
    /// Records processed so far
    pub processed: usize,

    /// Total records in this run
    pub total: usize,

    /// Whole-number percentage, 0 to 100
    pub percent: u8,
}

impl ProgressUpdate {
    fn new(processed: usize, total: usize) -> Self {
        let percent = if total == 0 {
            100
        } else {
            ((processed * 100) / total) as u8
        };
        ProgressUpdate {
            processed,
            total,
            percent,
        }
    }
}

/// Observer for the progress channel of a masking run
pub trait ProgressObserver {
    /// Called after each progress step; updates arrive in monotonically
    /// non-decreasing order and always end at 100%
    fn on_progress(&mut self, update: ProgressUpdate);
}

/// No-op observer for callers without a progress surface
#[derive(Debug, Default)]
pub struct NullObserver;

impl ProgressObserver for NullObserver {
    fn on_progress(&mut self, _update: ProgressUpdate) {}
}

impl<F: FnMut(ProgressUpdate)> ProgressObserver for F {
    fn on_progress(&mut self, update: ProgressUpdate) {
        self(update)
    }
}

/// Long-running merge of pending records into the store
#[derive(Debug)]
pub struct MaskingRun {
    /// Selected mask set for this run
    selection: MaskSelection,

    /// Masking configuration
    config: MaskingConfig,
}

impl MaskingRun {
    /// Create a run for a selection
    ///
    /// Fails with `EmptyMaskSet` when nothing is selected: the caller must
    /// block the operation and require at least one column, not fall
    /// through to an all-cleartext result.
    pub fn new(selection: MaskSelection, config: MaskingConfig) -> Result<Self> {
        if selection.is_empty() {
            return Err(MaskError::EmptyMaskSet);
        }
        Ok(MaskingRun { selection, config })
    }

    /// Process pending records, then commit them to the store
    ///
    /// Derives the masked form of every pending record while emitting
    /// progress, appends all of them in one step, and returns the outcome
    /// for the whole store as of the commit. The append happens only after
    /// progress reaches 100%; between "run started" and "append", no other
    /// writer may touch the store (trivially true in a single-threaded
    /// host).
    pub fn run(
        &self,
        store: &mut RecordStore,
        pending: Vec<Record>,
        observer: &mut dyn ProgressObserver,
    ) -> Result<MaskingOutcome> {
        let engine = MaskingEngine::new(self.config.clone());
        let total = pending.len();
        let cadence = self.config.progress_every.max(1);

        info!(
            "Masking run started: {} pending records, {} masked columns",
            total,
            self.selection.len()
        );
        observer.on_progress(ProgressUpdate::new(0, total));

        // The handles of pending rows depend on their post-append ordinals
        let base = store.len();
        for (offset, record) in pending.iter().enumerate() {
            for column in self.selection.iter() {
                let handle = engine.compute_handle(base + offset, column, &self.selection)?;
                debug!("Derived {} for pending row {}", handle, base + offset);
            }
            let processed = offset + 1;
            if processed % cadence == 0 || processed == total {
                observer.on_progress(ProgressUpdate::new(processed, total));
            }
        }

        // Single atomic commit: the store grows by all pending rows at once
        store.append(pending);
        info!("Masking run committed: store now has {} records", store.len());

        engine.mask_all(&store.snapshot(), &self.selection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ColumnSchema;

    fn test_schema() -> ColumnSchema {
        ColumnSchema::new(["氏名", "住所"]).unwrap()
    }

    fn seeded_store() -> RecordStore {
        RecordStore::new(
            test_schema(),
            vec![Record::from_pairs([("氏名", "田中 太郎")])],
        )
    }

    fn pending_records(n: usize) -> Vec<Record> {
        (0..n)
            .map(|i| Record::from_pairs([("氏名", format!("追加 {}", i))]))
            .collect()
    }

    #[test]
    fn test_run_refuses_empty_selection() {
        match MaskingRun::new(MaskSelection::none(), MaskingConfig::default()) {
            Err(MaskError::EmptyMaskSet) => {}
            _ => panic!("Expected EmptyMaskSet error"),
        }
    }

    #[test]
    fn test_run_appends_after_progress_completes() {
        let mut store = seeded_store();
        let selection = MaskSelection::new(store.schema(), ["氏名"]).unwrap();
        let run = MaskingRun::new(selection, MaskingConfig::default()).unwrap();

        let mut updates = Vec::new();
        let outcome = {
            let mut observer = |update: ProgressUpdate| updates.push(update);
            run.run(&mut store, pending_records(3), &mut observer).unwrap()
        };

        // All three pending rows landed in one commit
        assert_eq!(store.len(), 4);
        assert_eq!(outcome.masked.len(), 4);
        assert_eq!(outcome.mappings.len(), 4);

        // Progress is monotone and ends at 100%
        let percents: Vec<u8> = updates.iter().map(|u| u.percent).collect();
        assert!(percents.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(*percents.last().unwrap(), 100);
        assert_eq!(updates.last().unwrap().processed, 3);
        assert_eq!(updates.last().unwrap().total, 3);
    }

    #[test]
    fn test_run_handles_reflect_post_append_ordinals() {
        let mut store = seeded_store();
        let selection = MaskSelection::new(store.schema(), ["氏名"]).unwrap();
        let run = MaskingRun::new(selection, MaskingConfig::default()).unwrap();

        let outcome = run
            .run(&mut store, pending_records(2), &mut NullObserver)
            .unwrap();

        // Seed row keeps its handle; appended rows take the next ordinals
        let handles: Vec<&str> = outcome.mappings.iter().map(|m| m.handle.as_str()).collect();
        assert_eq!(handles, vec!["@user-1-1", "@user-2-1", "@user-3-1"]);
    }

    #[test]
    fn test_run_with_no_pending_records() {
        let mut store = seeded_store();
        let selection = MaskSelection::new(store.schema(), ["氏名"]).unwrap();
        let run = MaskingRun::new(selection, MaskingConfig::default()).unwrap();

        let mut last = None;
        let outcome = {
            let mut observer = |update: ProgressUpdate| last = Some(update);
            run.run(&mut store, Vec::new(), &mut observer).unwrap()
        };

        assert_eq!(store.len(), 1);
        assert_eq!(outcome.masked.len(), 1);
        // An empty run still completes its progress channel
        assert_eq!(last.unwrap().percent, 100);
    }

    #[test]
    fn test_progress_cadence() {
        let mut store = RecordStore::empty(test_schema());
        let selection = MaskSelection::new(store.schema(), ["氏名"]).unwrap();
        let config = MaskingConfig {
            progress_every: 4,
            ..Default::default()
        };
        let run = MaskingRun::new(selection, config).unwrap();

        let mut updates = Vec::new();
        {
            let mut observer = |update: ProgressUpdate| updates.push(update);
            run.run(&mut store, pending_records(10), &mut observer).unwrap();
        }

        // Initial 0%, one update per cadence step, and the final record
        let processed: Vec<usize> = updates.iter().map(|u| u.processed).collect();
        assert_eq!(processed, vec![0, 4, 8, 10]);
    }
}
