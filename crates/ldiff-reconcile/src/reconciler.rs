//! Two-pass reconciliation.
//!
//! Pass one walks the source key index: each key is located in both exports,
//! keys the target lacks are recorded as missing on the target, and present
//! pairs are diffed. Pass two walks the target key index and only records
//! keys the source lacks; diffs were already taken in pass one and are not
//! recomputed.
//!
//! Each export keeps its own cursor. A lookup resumes from the cursor and
//! falls back to one rescan from the start on a miss, because the exports
//! need not list entries in the same order.

use std::io::{BufRead, Seek};

use ldiff_diff::diff_records;
use ldiff_scan::{build_key_index, KeyIndex, LocateResult, RecordLocator, ScanCursor};
use ldiff_types::{IgnoreSet, Key, Record};
use tracing::{debug, info, warn};

use crate::config::ReconcileConfig;
use crate::error::ReconcileResult;
use crate::result::{MissingEntry, Reconciliation};

/// Reconciles a source export against a target export.
#[derive(Clone, Debug)]
pub struct Reconciler {
    config: ReconcileConfig,
    locator: RecordLocator,
}

impl Default for Reconciler {
    fn default() -> Self {
        Self::new(ReconcileConfig::default())
    }
}

impl Reconciler {
    /// Create a reconciler for the given configuration.
    pub fn new(config: ReconcileConfig) -> Self {
        let locator = RecordLocator::new(config.decode_ignore());
        Self { config, locator }
    }

    /// The active configuration.
    pub fn config(&self) -> &ReconcileConfig {
        &self.config
    }

    /// Index both exports and run both passes.
    ///
    /// Only I/O failures abort; entries that cannot be decoded are treated
    /// as absent.
    pub fn run<S, T>(&self, source: &mut S, target: &mut T) -> ReconcileResult<Reconciliation>
    where
        S: BufRead + Seek,
        T: BufRead + Seek,
    {
        let source_index = build_key_index(source)?;
        let target_index = build_key_index(target)?;
        info!(
            source = source_index.len(),
            target = target_index.len(),
            "indexed exports"
        );

        let mut result = Reconciliation::new(source_index.len(), target_index.len());
        self.source_pass(source, target, &source_index, &mut result)?;
        self.target_pass(source, target, &target_index, &mut result)?;

        info!(
            missing_on_target = result.missing_on_target.len(),
            missing_on_source = result.missing_on_source.len(),
            diffs = result.diffs.len(),
            "reconciliation complete"
        );
        Ok(result)
    }

    /// Source-driven pass: missing-on-target entries and all diffs.
    fn source_pass<S, T>(
        &self,
        source: &mut S,
        target: &mut T,
        index: &KeyIndex,
        result: &mut Reconciliation,
    ) -> ReconcileResult<()>
    where
        S: BufRead + Seek,
        T: BufRead + Seek,
    {
        let mut source_cursor = ScanCursor::START;
        let mut target_cursor = ScanCursor::START;

        for key in index {
            let Some(source_record) = self.lookup(source, &mut source_cursor, key)? else {
                // Pass two reports it as missing on source if the target is intact.
                warn!(%key, "source entry unreadable");
                if self.lookup(target, &mut target_cursor, key)?.is_none() {
                    result.missing_on_target.push(MissingEntry {
                        key: key.clone(),
                        created: None,
                    });
                }
                continue;
            };

            match self.lookup(target, &mut target_cursor, key)? {
                Some(target_record) => {
                    if let Some(diff) =
                        diff_records(&source_record, &target_record, &self.config.ignore)
                    {
                        debug!(%key, attributes = diff.count, "entry differs");
                        result.diffs.push(diff);
                    }
                }
                None => {
                    debug!(%key, "missing on target");
                    result
                        .missing_on_target
                        .push(self.missing_entry(key, &source_record));
                }
            }
        }

        info!(
            missing = result.missing_on_target.len(),
            diffs = result.diffs.len(),
            "source pass complete"
        );
        Ok(())
    }

    /// Target-driven pass: missing-on-source entries only.
    fn target_pass<S, T>(
        &self,
        source: &mut S,
        target: &mut T,
        index: &KeyIndex,
        result: &mut Reconciliation,
    ) -> ReconcileResult<()>
    where
        S: BufRead + Seek,
        T: BufRead + Seek,
    {
        let mut source_cursor = ScanCursor::START;
        let mut target_cursor = ScanCursor::START;

        for key in index {
            let Some(target_record) = self.lookup(target, &mut target_cursor, key)? else {
                warn!(%key, "target entry unreadable");
                if self.lookup(source, &mut source_cursor, key)?.is_none() {
                    result.missing_on_source.push(MissingEntry {
                        key: key.clone(),
                        created: None,
                    });
                }
                continue;
            };

            if self.lookup(source, &mut source_cursor, key)?.is_none() {
                debug!(%key, "missing on source");
                result
                    .missing_on_source
                    .push(self.missing_entry(key, &target_record));
            }
        }

        info!(
            missing = result.missing_on_source.len(),
            "target pass complete"
        );
        Ok(())
    }

    /// Locate `key` from `cursor`, retrying once from the start on a miss.
    ///
    /// The cursor advances only on success.
    fn lookup<R: BufRead + Seek>(
        &self,
        stream: &mut R,
        cursor: &mut ScanCursor,
        key: &Key,
    ) -> ReconcileResult<Option<Record>> {
        let LocateResult {
            record,
            cursor: stopped,
        } = self.locator.locate_with_retry(stream, *cursor, key)?;
        if record.is_some() {
            *cursor = stopped;
        }
        Ok(record)
    }

    fn missing_entry(&self, key: &Key, record: &Record) -> MissingEntry {
        let created = self
            .config
            .timestamp_attribute()
            .and_then(|name| record.first_value(name))
            .map(str::to_string);
        MissingEntry {
            key: key.clone(),
            created,
        }
    }
}

/// Reconcile two exports with the given ignore set and the default
/// creation-time attribute.
pub fn reconcile<S, T>(
    source: &mut S,
    target: &mut T,
    ignore: &IgnoreSet,
) -> ReconcileResult<Reconciliation>
where
    S: BufRead + Seek,
    T: BufRead + Seek,
{
    Reconciler::new(ReconcileConfig::with_ignore(ignore.clone())).run(source, target)
}
