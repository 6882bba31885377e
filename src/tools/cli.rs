use std::path::PathBuf;
use std::{fmt::Display, fmt::Formatter};

use clap::{ArgGroup, Parser};
use log::info;

/// Verbosity of user information
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Errors,
    Warnings,
    Info,
    Debug,
    Trace,
}

impl Verbosity {
    /// Map a count of -v flags to a verbosity. No flag reports errors only.
    pub fn from_count(count: u8) -> Self {
        match count {
            0 => Verbosity::Errors,
            1 => Verbosity::Warnings,
            2 => Verbosity::Info,
            3 => Verbosity::Debug,
            _ => Verbosity::Trace,
        }
    }

    pub fn level_filter(self) -> log::LevelFilter {
        match self {
            Verbosity::Quiet => log::LevelFilter::Off,
            Verbosity::Errors => log::LevelFilter::Error,
            Verbosity::Warnings => log::LevelFilter::Warn,
            Verbosity::Info => log::LevelFilter::Info,
            Verbosity::Debug => log::LevelFilter::Debug,
            Verbosity::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Encode, Decode, Test
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Encode,
    Decode,
    Test,
}
impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Resolved program options.
#[derive(Debug)]
pub struct RlOpts {
    /// File to read for input
    pub file: PathBuf,
    /// Encode/Decode/Test
    pub op_mode: Mode,
    /// Silently overwrite existing files with the same name
    pub force_overwrite: bool,
    /// Verbosity of user information
    pub verbose: Verbosity,
}

impl RlOpts {
    pub fn new() -> Self {
        Self {
            file: PathBuf::new(),
            op_mode: Mode::Encode,
            force_overwrite: false,
            verbose: Verbosity::Errors,
        }
    }
}

impl Default for RlOpts {
    fn default() -> Self {
        Self::new()
    }
}

/// Command Line Interpretation - uses external CLAP crate.
#[derive(Parser, Debug)]
#[clap(
    name = "rlenc",
    version,
    about = "Modified run-length compressor",
    long_about = "
    Sorts the input with a Burrows-Wheeler transform, renumbers the bytes by frequency,
    splits the result into bit planes and stores the planes as run lengths.

    Encoding writes <FILE>.run. Decoding a .run file restores the original next to it.
    Existing files are never overwritten unless --force is given."
)]
#[clap(group(ArgGroup::new("mode").required(true).args(&["encode", "decode", "test"])))]
pub struct Args {
    /// File to process
    #[clap(value_parser)]
    pub filename: PathBuf,

    /// Encode FILE into FILE.run
    #[clap(short = 'e', long = "encode")]
    pub encode: bool,

    /// Decode FILE.run back into FILE
    #[clap(short = 'd', long = "decode")]
    pub decode: bool,

    /// Check that a .run file decodes, without writing anything
    #[clap(short = 't', long = "test")]
    pub test: bool,

    /// Overwrite an existing output file
    #[clap(short = 'f', long = "force")]
    pub force: bool,

    /// Be verbose (a 2nd -v gives more). Release builds stop at warnings
    #[clap(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all messages
    #[clap(short = 'q', long = "quiet")]
    pub quiet: bool,
}

impl From<Args> for RlOpts {
    fn from(args: Args) -> Self {
        let op_mode = if args.decode {
            Mode::Decode
        } else if args.test {
            Mode::Test
        } else {
            Mode::Encode
        };
        let verbose = if args.quiet {
            Verbosity::Quiet
        } else {
            Verbosity::from_count(args.verbose)
        };
        Self {
            file: args.filename,
            op_mode,
            force_overwrite: args.force,
            verbose,
        }
    }
}

/// Parse the command line, set the log level and report the settings.
pub fn rlopts_init() -> RlOpts {
    let opts = RlOpts::from(Args::parse());

    // Set the log level
    log::set_max_level(opts.verbose.level_filter());

    info!("---- rlenc Initialization Start ----");
    info!("Verbosity set to {}", log::max_level());
    info!("Operational mode set to {}", opts.op_mode);
    info!("Getting input from the file {}", opts.file.display());
    if opts.force_overwrite {
        info!("Forcing file overwriting")
    };
    info!("---- rlenc Initialization End ----\n");
    opts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<RlOpts, clap::Error> {
        Args::try_parse_from(args).map(RlOpts::from)
    }

    #[test]
    fn encode_flags() {
        let opts = parse(&["rlenc", "-e", "book.txt"]).unwrap();
        assert_eq!(opts.op_mode, Mode::Encode);
        assert_eq!(opts.file, PathBuf::from("book.txt"));
        assert!(!opts.force_overwrite);
        assert_eq!(opts.verbose, Verbosity::Errors);
    }

    #[test]
    fn decode_long_flags() {
        let opts = parse(&["rlenc", "--decode", "--force", "book.txt.run"]).unwrap();
        assert_eq!(opts.op_mode, Mode::Decode);
        assert!(opts.force_overwrite);
    }

    #[test]
    fn test_mode_and_verbosity() {
        let opts = parse(&["rlenc", "-t", "-vvv", "book.txt.run"]).unwrap();
        assert_eq!(opts.op_mode, Mode::Test);
        assert_eq!(opts.verbose, Verbosity::Debug);
        assert_eq!(opts.verbose.level_filter(), log::LevelFilter::Debug);
    }

    #[test]
    fn repeated_verbose_flags_count_up() {
        let opts = parse(&["rlenc", "-e", "-v", "--verbose", "x"]).unwrap();
        assert_eq!(opts.verbose, Verbosity::Info);
        let opts = parse(&["rlenc", "-e", "-vvvvvv", "x"]).unwrap();
        assert_eq!(opts.verbose, Verbosity::Trace);
        assert_eq!(Verbosity::from_count(1), Verbosity::Warnings);
    }

    #[test]
    fn help_mentions_release_log_limit() {
        use clap::CommandFactory;

        let mut help = Vec::new();
        Args::command().write_long_help(&mut help).unwrap();
        let help = String::from_utf8(help).unwrap();
        assert!(help.contains("Release builds stop at warnings"));
    }

    #[test]
    fn quiet_wins() {
        let opts = parse(&["rlenc", "-e", "-q", "-vv", "x"]).unwrap();
        assert_eq!(opts.verbose, Verbosity::Quiet);
    }

    #[test]
    fn mode_is_required_and_exclusive() {
        assert!(parse(&["rlenc", "book.txt"]).is_err());
        assert!(parse(&["rlenc", "-e", "-d", "book.txt"]).is_err());
        assert!(parse(&["rlenc", "-e"]).is_err());
    }
}
