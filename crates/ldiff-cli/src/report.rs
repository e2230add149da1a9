//! Human-readable rendering of a reconciliation.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, Local};
use colored::Colorize;
use ldiff_diff::{RecordDiff, ValueChange};
use ldiff_reconcile::{MissingEntry, Reconciliation};

/// A text report over one reconciliation.
pub struct Report<'a> {
    pub source: &'a Path,
    pub target: &'a Path,
    pub generated: DateTime<Local>,
    pub elapsed: Duration,
    pub result: &'a Reconciliation,
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.result;
        writeln!(f, "{}", "ldiff report".bold())?;
        writeln!(f, "  Source:    {} ({} entries)", self.source.display(), r.source_count)?;
        writeln!(f, "  Target:    {} ({} entries)", self.target.display(), r.target_count)?;
        writeln!(f, "  Generated: {}", self.generated.format("%Y-%m-%d %H:%M:%S"))?;
        writeln!(f, "  Elapsed:   {:.2}s", self.elapsed.as_secs_f64())?;

        if r.is_clean() {
            writeln!(f, "\n{} No differences.", "✓".green().bold())?;
            return Ok(());
        }

        write_missing(f, "Missing on target", &r.missing_on_target)?;
        write_missing(f, "Missing on source", &r.missing_on_source)?;

        if !r.diffs.is_empty() {
            writeln!(
                f,
                "\n{} ({} entries, {} attributes)",
                "Attribute differences".bold(),
                r.diffs.len(),
                r.attribute_differences()
            )?;
            for diff in &r.diffs {
                write_diff(f, diff)?;
            }
        }
        Ok(())
    }
}

/// Creation label for a missing entry: the parsed time when possible,
/// otherwise the raw attribute value.
pub fn created_label(entry: &MissingEntry) -> Option<String> {
    entry
        .created_time()
        .map(|t| t.to_string())
        .or_else(|| entry.created.clone())
}

fn write_missing(f: &mut fmt::Formatter<'_>, title: &str, entries: &[MissingEntry]) -> fmt::Result {
    if entries.is_empty() {
        return Ok(());
    }
    writeln!(f, "\n{} ({})", title.bold(), entries.len())?;
    for entry in entries {
        match created_label(entry) {
            Some(label) => writeln!(f, "  - {}  (created {})", entry.key.to_string().yellow(), label)?,
            None => writeln!(f, "  - {}", entry.key.to_string().yellow())?,
        }
    }
    Ok(())
}

fn write_diff(f: &mut fmt::Formatter<'_>, diff: &RecordDiff) -> fmt::Result {
    writeln!(f, "\n  {} ({})", diff.key.to_string().yellow().bold(), diff.count)?;
    for missing in &diff.missing {
        writeln!(f, "    {missing}")?;
    }
    for mismatch in &diff.mismatches {
        writeln!(f, "    {}:", mismatch.attribute.cyan())?;
        for change in mismatch.value_changes() {
            match change {
                ValueChange::Removed(v) => writeln!(f, "      {} {}", "-".red(), v.red())?,
                ValueChange::Added(v) => writeln!(f, "      {} {}", "+".green(), v.green())?,
                ValueChange::Unchanged(v) => writeln!(f, "        {}", v.dimmed())?,
            }
        }
    }
    Ok(())
}
