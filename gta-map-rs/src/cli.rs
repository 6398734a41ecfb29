//! Root CLI structure for gta-map-rs

use clap::{Parser, Subcommand};
use log::LevelFilter;

#[derive(Parser)]
#[command(name = "gta-map-rs")]
#[command(about = "Command-line tools for GTA San Andreas map files", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (can be repeated for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    /// Log level selected by `-v`/`-q`; `RUST_LOG` is applied on top of it
    pub fn log_level(&self) -> LevelFilter {
        match (self.verbose, self.quiet) {
            (0, true) => LevelFilter::Error,
            (0, false) => LevelFilter::Warn,
            (1, _) => LevelFilter::Info,
            (2, _) => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// IMG archive operations
    Img {
        #[command(subcommand)]
        command: crate::commands::img::ImgCommands,
    },

    /// IPL item placement operations
    Ipl {
        #[command(subcommand)]
        command: crate::commands::ipl::IplCommands,
    },

    /// IDE object definition operations
    Ide {
        #[command(subcommand)]
        command: crate::commands::ide::IdeCommands,
    },

    /// water.dat operations
    Water {
        #[command(subcommand)]
        command: crate::commands::water::WaterCommands,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(args: &[&str]) -> LevelFilter {
        let mut argv = vec!["gta-map-rs"];
        argv.extend_from_slice(args);
        argv.extend_from_slice(&["completions", "bash"]);
        Cli::try_parse_from(argv).unwrap().log_level()
    }

    #[test]
    fn test_log_level_from_flags() {
        assert_eq!(level(&[]), LevelFilter::Warn);
        assert_eq!(level(&["-q"]), LevelFilter::Error);
        assert_eq!(level(&["-v"]), LevelFilter::Info);
        assert_eq!(level(&["-vv"]), LevelFilter::Debug);
        assert_eq!(level(&["-vvvv"]), LevelFilter::Trace);
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["gta-map-rs", "-q", "-v", "completions", "bash"]).is_err());
    }
}
