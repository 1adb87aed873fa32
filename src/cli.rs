use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Dockscope - A terminal UI for viewing container logs
#[derive(Parser, Debug)]
#[command(name = "dockscope")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Container id or name (a file path with --source file, "-" for stdin)
    #[arg(value_name = "TARGET")]
    pub target: String,

    /// Show only error-like records
    #[arg(short = 'e', long = "err")]
    pub errors_only: bool,

    /// Number of historical lines to request (0 = all)
    #[arg(short, long, value_name = "N")]
    pub tail: Option<usize>,

    /// Where the log lines come from
    #[arg(long, value_enum, default_value_t = SourceKind::Docker)]
    pub source: SourceKind,

    /// Docker executable to run
    #[arg(long, value_name = "PATH")]
    pub docker_bin: Option<String>,

    /// Start with word wrap disabled
    #[arg(long)]
    pub no_wrap: bool,

    /// Config file (defaults to $DOCKSCOPE_CONFIG, then the user config dir)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write diagnostics to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

/// Log source selected on the command line
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SourceKind {
    Docker,
    File,
    Stdin,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_short_flags() {
        let args = Args::try_parse_from(["dockscope", "web-1", "-e", "-t", "200"]).unwrap();
        assert_eq!(args.target, "web-1");
        assert!(args.errors_only);
        assert_eq!(args.tail, Some(200));
        assert_eq!(args.source, SourceKind::Docker);
        assert!(!args.no_wrap);
    }

    #[test]
    fn test_parse_long_flags() {
        let args = Args::try_parse_from([
            "dockscope",
            "/var/log/app.log",
            "--err",
            "--source",
            "file",
            "--no-wrap",
            "--log-file",
            "/tmp/dockscope.log",
        ])
        .unwrap();
        assert!(args.errors_only);
        assert_eq!(args.source, SourceKind::File);
        assert!(args.no_wrap);
        assert_eq!(args.log_file, Some(PathBuf::from("/tmp/dockscope.log")));
    }

    #[test]
    fn test_target_is_required() {
        assert!(Args::try_parse_from(["dockscope"]).is_err());
    }
}
