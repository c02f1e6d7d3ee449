//! CLI argument definitions for the grade book

use clap::{builder::BoolishValueParser, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use grade_book::config::ConfigOverrides;
use grade_book::logger::Level;

/// CLI log level argument
///
/// Converts to lowercase strings for config storage and to `logger::Level` for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let as_str = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        };
        write!(f, "{as_str}")
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `data_dir`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the interactive menu (default when no subcommand is given).
    Menu,
    /// Add a student.
    AddStudent {
        /// Student email (unique, case-insensitive)
        #[arg(value_name = "EMAIL")]
        email: String,
        /// Student display name
        #[arg(value_name = "NAMES")]
        names: String,
    },
    /// Add a course.
    AddCourse {
        /// Course name (unique)
        #[arg(value_name = "NAME")]
        name: String,
        /// Trimester label
        #[arg(value_name = "TRIMESTER")]
        trimester: String,
        /// Credit hours
        #[arg(value_name = "CREDITS")]
        credits: u32,
    },
    /// Register a student for a course.
    Enroll {
        /// Student email
        #[arg(value_name = "EMAIL")]
        email: String,
        /// Course name
        #[arg(value_name = "COURSE")]
        course: String,
    },
    /// Record a percentage grade for a registered course.
    Grade {
        /// Student email
        #[arg(value_name = "EMAIL")]
        email: String,
        /// Course name
        #[arg(value_name = "COURSE")]
        course: String,
        /// Grade out of 100
        #[arg(value_name = "PERCENTAGE")]
        percentage: f64,
    },
    /// List students ranked by GPA.
    Rank,
    /// List students whose GPA lies in an inclusive range.
    Filter {
        /// Minimum GPA
        #[arg(value_name = "MIN")]
        min: f64,
        /// Maximum GPA
        #[arg(value_name = "MAX")]
        max: f64,
    },
    /// Print the transcript, or write it as a report.
    Transcript {
        /// Report format: markdown (md) or html. Prints to the terminal when omitted.
        #[arg(short, long, value_name = "FORMAT")]
        format: Option<String>,

        /// Output file path (defaults to `transcript.<ext>` in the reports directory)
        #[arg(short, long, value_name = "FILE", requires = "format")]
        output: Option<PathBuf>,
    },
    /// List available courses.
    Courses,
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "gradebook",
    about = "Grade book: students, courses, grades and GPA rankings",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level (stored in config file)
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Directory holding students.json and courses.json
    #[arg(long = "data-dir", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Students document path
    #[arg(long = "students-file", value_name = "FILE")]
    pub students_file: Option<PathBuf>,

    /// Courses document path
    #[arg(long = "courses-file", value_name = "FILE")]
    pub courses_file: Option<PathBuf>,

    /// Directory for transcript reports
    #[arg(long = "reports-dir", value_name = "DIR")]
    pub reports_dir: Option<PathBuf>,

    /// Subcommand to execute; the interactive menu runs when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
}

fn path_string(path: Option<&PathBuf>) -> Option<String> {
    path.map(|p| p.to_string_lossy().to_string())
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// # Returns
    /// A `ConfigOverrides` struct with values from CLI flags, where `None` means no override.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string()),
            file: path_string(self.config_log_file.as_ref()),
            verbose: self.config_verbose,
            data_dir: path_string(self.data_dir.as_ref()),
            students_file: path_string(self.students_file.as_ref()),
            courses_file: path_string(self.courses_file.as_ref()),
            reports_dir: path_string(self.reports_dir.as_ref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_display() {
        assert_eq!(LogLevelArg::Error.to_string(), "error");
        assert_eq!(LogLevelArg::Warn.to_string(), "warn");
        assert_eq!(LogLevelArg::Info.to_string(), "info");
        assert_eq!(LogLevelArg::Debug.to_string(), "debug");
    }

    #[test]
    fn test_log_level_to_logger_level() {
        assert_eq!(Level::from(LogLevelArg::Error), Level::Error);
        assert_eq!(Level::from(LogLevelArg::Warn), Level::Warn);
        assert_eq!(Level::from(LogLevelArg::Info), Level::Info);
        assert_eq!(Level::from(LogLevelArg::Debug), Level::Debug);
    }

    #[test]
    fn test_no_subcommand_parses() {
        let cli = Cli::try_parse_from(["gradebook"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_grade_subcommand_parses() {
        let cli =
            Cli::try_parse_from(["gradebook", "grade", "a@x.com", "CS101", "95.5"]).unwrap();
        match cli.command {
            Some(Command::Grade {
                email,
                course,
                percentage,
            }) => {
                assert_eq!(email, "a@x.com");
                assert_eq!(course, "CS101");
                assert!((percentage - 95.5).abs() < f64::EPSILON);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_output_requires_format() {
        assert!(Cli::try_parse_from(["gradebook", "transcript", "-o", "t.md"]).is_err());
        assert!(
            Cli::try_parse_from(["gradebook", "transcript", "-f", "md", "-o", "t.md"]).is_ok()
        );
    }

    #[test]
    fn test_to_config_overrides() {
        let cli = Cli::try_parse_from([
            "gradebook",
            "--config-level",
            "debug",
            "--data-dir",
            "/tmp/grades",
            "--courses-file",
            "c.json",
            "rank",
        ])
        .unwrap();

        let overrides = cli.to_config_overrides();
        assert_eq!(overrides.level, Some("debug".to_string()));
        assert_eq!(overrides.data_dir, Some("/tmp/grades".to_string()));
        assert_eq!(overrides.courses_file, Some("c.json".to_string()));
        assert!(overrides.students_file.is_none());
        assert!(overrides.verbose.is_none());
        assert!(overrides.file.is_none());
    }
}
