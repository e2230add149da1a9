use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "ldiff",
    about = "Compare two directory exports entry by entry",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compare a source export against a target export
    Compare(CompareArgs),
    /// List every entry key in an export
    Keys(KeysArgs),
    /// Print one entry of an export
    Show(ShowArgs),
}

#[derive(Args)]
pub struct CompareArgs {
    pub source: PathBuf,
    pub target: PathBuf,
    /// Attribute to leave out of the comparison (repeatable, comma-separated)
    #[arg(short, long = "ignore", value_name = "ATTR", value_delimiter = ',')]
    pub ignore: Vec<String>,
    /// TOML file with `ignore` and `timestamp_attribute`
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Attribute holding the creation time of an entry
    #[arg(long, value_name = "NAME", conflicts_with = "no_timestamp")]
    pub timestamp_attr: Option<String>,
    /// Do not label missing entries with their creation time
    #[arg(long)]
    pub no_timestamp: bool,
    /// Write the report to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct KeysArgs {
    pub file: PathBuf,
}

#[derive(Args)]
pub struct ShowArgs {
    pub file: PathBuf,
    pub dn: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_compare() {
        let cli = Cli::try_parse_from(["ldiff", "compare", "a.ldif", "b.ldif"]).unwrap();
        if let Command::Compare(args) = cli.command {
            assert_eq!(args.source, PathBuf::from("a.ldif"));
            assert_eq!(args.target, PathBuf::from("b.ldif"));
            assert!(args.ignore.is_empty());
            assert!(args.output.is_none());
            assert!(!args.no_timestamp);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_compare_ignores() {
        let cli = Cli::try_parse_from([
            "ldiff", "compare", "a", "b", "-i", "modifyTimestamp,entryCSN", "--ignore", "entryUUID",
        ]).unwrap();
        if let Command::Compare(args) = cli.command {
            assert_eq!(args.ignore, vec!["modifyTimestamp", "entryCSN", "entryUUID"]);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_compare_output_and_config() {
        let cli = Cli::try_parse_from([
            "ldiff", "compare", "a", "b", "-o", "report.txt", "--config", "ldiff.toml",
        ]).unwrap();
        if let Command::Compare(args) = cli.command {
            assert_eq!(args.output, Some(PathBuf::from("report.txt")));
            assert_eq!(args.config, Some(PathBuf::from("ldiff.toml")));
        } else { panic!("wrong command"); }
    }

    #[test]
    fn timestamp_flags_conflict() {
        let result = Cli::try_parse_from([
            "ldiff", "compare", "a", "b", "--timestamp-attr", "whenCreated", "--no-timestamp",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn compare_requires_two_files() {
        assert!(Cli::try_parse_from(["ldiff", "compare", "a"]).is_err());
    }

    #[test]
    fn parse_keys() {
        let cli = Cli::try_parse_from(["ldiff", "keys", "a.ldif"]).unwrap();
        assert!(matches!(cli.command, Command::Keys(_)));
    }

    #[test]
    fn parse_show() {
        let cli = Cli::try_parse_from(["ldiff", "show", "a.ldif", "cn=x,dc=example"]).unwrap();
        if let Command::Show(args) = cli.command {
            assert_eq!(args.dn, "cn=x,dc=example");
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_verbose_and_json() {
        let cli = Cli::try_parse_from(["ldiff", "--verbose", "--format", "json", "keys", "a"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.format, OutputFormat::Json));
    }
}
