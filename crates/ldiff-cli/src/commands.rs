use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;
use std::time::Instant;

use anyhow::{bail, Context};
use chrono::Local;
use colored::Colorize;
use ldiff_reconcile::{ReconcileConfig, Reconciler};
use ldiff_scan::{build_key_index, locate_record, ScanCursor};
use ldiff_types::Key;
use tracing::info;

use crate::cli::*;
use crate::report::Report;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let Cli { command, format, .. } = cli;
    match command {
        Command::Compare(args) => cmd_compare(args, format),
        Command::Keys(args) => cmd_keys(args, format),
        Command::Show(args) => cmd_show(args, format),
    }
}

/// Reject paths that are missing, not regular files, or empty.
fn check_export(path: &Path) -> anyhow::Result<()> {
    let meta = fs::metadata(path).with_context(|| format!("cannot read {}", path.display()))?;
    if !meta.is_file() {
        bail!("{} is not a regular file", path.display());
    }
    if meta.len() == 0 {
        bail!("{} is empty", path.display());
    }
    Ok(())
}

fn open_export(path: &Path) -> anyhow::Result<BufReader<File>> {
    check_export(path)?;
    let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
    Ok(BufReader::new(file))
}

/// Config file (or defaults), then command-line overrides.
fn build_config(args: &CompareArgs) -> anyhow::Result<ReconcileConfig> {
    let mut config = match &args.config {
        Some(path) => ReconcileConfig::load(path)
            .with_context(|| format!("cannot load config {}", path.display()))?,
        None => ReconcileConfig::default(),
    };
    config.ignore.extend(&args.ignore);
    if let Some(name) = &args.timestamp_attr {
        config.timestamp_attribute = Some(name.clone());
    }
    if args.no_timestamp {
        config.timestamp_attribute = None;
    }
    Ok(config)
}

fn cmd_compare(args: CompareArgs, format: OutputFormat) -> anyhow::Result<()> {
    let reconciler = Reconciler::new(build_config(&args)?);
    let mut source = open_export(&args.source)?;
    let mut target = open_export(&args.target)?;

    info!(
        source = %args.source.display(),
        target = %args.target.display(),
        ignored = reconciler.config().ignore.len(),
        "comparing exports"
    );
    let started = Instant::now();
    let result = reconciler
        .run(&mut source, &mut target)
        .context("reconciliation failed")?;

    if args.output.is_some() {
        colored::control::set_override(false);
    }
    let rendered = match format {
        OutputFormat::Text => Report {
            source: &args.source,
            target: &args.target,
            generated: Local::now(),
            elapsed: started.elapsed(),
            result: &result,
        }
        .to_string(),
        OutputFormat::Json => serde_json::to_string_pretty(&result)? + "\n",
    };

    match &args.output {
        Some(path) => {
            fs::write(path, rendered)
                .with_context(|| format!("cannot write report to {}", path.display()))?;
            println!("{} Report written to {}", "✓".green().bold(), path.display());
        }
        None => print!("{rendered}"),
    }
    Ok(())
}

fn cmd_keys(args: KeysArgs, format: OutputFormat) -> anyhow::Result<()> {
    let mut stream = open_export(&args.file)?;
    let index = build_key_index(&mut stream)?;
    match format {
        OutputFormat::Text => {
            for key in &index {
                println!("{key}");
            }
            println!("{} entries", index.len().to_string().bold());
        }
        OutputFormat::Json => {
            let json = serde_json::json!({ "count": index.len(), "keys": index.keys() });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
    }
    Ok(())
}

fn cmd_show(args: ShowArgs, format: OutputFormat) -> anyhow::Result<()> {
    let mut stream = open_export(&args.file)?;
    let key = Key::new(&args.dn);
    let located = locate_record(&mut stream, ScanCursor::START, &key)?;
    let Some(record) = located.record else {
        bail!("entry not found: {key}");
    };
    match format {
        OutputFormat::Text => {
            println!("{} {}", "dn:".bold(), record.key().to_string().yellow());
            for (name, values) in record.attributes() {
                for value in values {
                    println!("{}: {}", name.cyan(), value);
                }
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&record)?),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn compare_args(source: PathBuf, target: PathBuf) -> CompareArgs {
        CompareArgs {
            source,
            target,
            ignore: Vec::new(),
            config: None,
            timestamp_attr: None,
            no_timestamp: false,
            output: None,
        }
    }

    #[test]
    fn check_export_rejects_missing_and_empty() {
        let dir = tempfile::tempdir().unwrap();
        let empty = dir.path().join("empty.ldif");
        fs::write(&empty, "").unwrap();

        assert!(check_export(&dir.path().join("nope.ldif")).is_err());
        assert!(check_export(dir.path()).is_err());
        let err = check_export(&empty).unwrap_err();
        assert!(err.to_string().contains("is empty"));
    }

    #[test]
    fn config_merges_file_and_flags() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("ldiff.toml");
        fs::write(&config_path, "ignore = [\"entryCSN\"]\ntimestamp_attribute = \"whenCreated\"\n").unwrap();

        let mut args = compare_args("a".into(), "b".into());
        args.config = Some(config_path);
        args.ignore = vec!["modifyTimestamp".into()];
        let config = build_config(&args).unwrap();
        assert!(config.ignore.contains("entrycsn"));
        assert!(config.ignore.contains("modifytimestamp"));
        assert_eq!(config.timestamp_attribute(), Some("whenCreated"));

        args.no_timestamp = true;
        assert!(build_config(&args).unwrap().timestamp_attribute().is_none());
    }

    #[test]
    fn compare_writes_report_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source.ldif");
        let target = dir.path().join("target.ldif");
        let output = dir.path().join("report.txt");
        fs::write(&source, "dn: cn=x\nmail: a@x.com\n\ndn: cn=y\ncn: y\n").unwrap();
        fs::write(&target, "dn: cn=x\nmail: b@x.com\n").unwrap();

        let mut args = compare_args(source, target);
        args.output = Some(output.clone());
        cmd_compare(args, OutputFormat::Text).unwrap();

        let text = fs::read_to_string(&output).unwrap();
        assert!(text.contains("Missing on target (1)"));
        assert!(text.contains("- cn=y"));
        assert!(text.contains("- a@x.com"));
        assert!(text.contains("+ b@x.com"));
    }

    #[test]
    fn compare_writes_json_report() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source.ldif");
        let target = dir.path().join("target.ldif");
        let output = dir.path().join("report.json");
        fs::write(&source, "dn: cn=x\ncn: x\n").unwrap();
        fs::write(&target, "dn: cn=x\ncn: x\n").unwrap();

        let mut args = compare_args(source, target);
        args.output = Some(output.clone());
        cmd_compare(args, OutputFormat::Json).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(json["source_count"], 1);
        assert_eq!(json["diffs"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn show_reports_unknown_entry() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.ldif");
        fs::write(&file, "dn: cn=x\ncn: x\n").unwrap();
        let args = ShowArgs { file, dn: "cn=y".into() };
        let err = cmd_show(args, OutputFormat::Text).unwrap_err();
        assert!(err.to_string().contains("entry not found: cn=y"));
    }
}
