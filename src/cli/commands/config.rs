//! `gradebook config` handler
//!
//! Changes are checked against the data files they resolve to before the config
//! file is written, so a bad setting can't leave the grade book unreadable.

use crate::args::ConfigSubcommand;
use grade_book::config::Config;
use std::io::{self, BufRead, Write};

/// Keys whose value moves the students or courses document
const DATA_FILE_KEYS: [&str; 6] = [
    "data_dir",
    "data-dir",
    "students_file",
    "students-file",
    "courses_file",
    "courses-file",
];

/// Dispatch config subcommands; exits with status 1 on failure
pub fn run(subcommand: Option<ConfigSubcommand>, config: &mut Config, defaults: &Config) {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let result = match subcommand {
        None => write_config(&mut out, config, None),
        Some(ConfigSubcommand::Get { key }) => write_config(&mut out, config, key.as_deref()),
        Some(ConfigSubcommand::Set { key, value }) => {
            update(&mut out, config, &key, |c| set_value(c, &key, &value))
        }
        Some(ConfigSubcommand::Unset { key }) => {
            update(&mut out, config, &key, |c| unset_value(c, defaults, &key))
        }
        Some(ConfigSubcommand::Reset) => reset(&mut io::stdin().lock(), &mut out),
    };

    if let Err(e) = result {
        eprintln!("✗ {e}");
        std::process::exit(1);
    }
}

/// Print one value, or the whole config with the files it resolves to
///
/// # Errors
/// Returns a message for an unknown key or a failed write.
pub fn write_config(
    out: &mut impl Write,
    config: &Config,
    key: Option<&str>,
) -> Result<(), String> {
    let written = match key {
        Some(k) => {
            let value = config
                .get(k)
                .ok_or_else(|| format!("Unknown config key: '{k}'"))?;
            writeln!(out, "{value}")
        }
        None => writeln!(out, "\n=== Configuration ===\n")
            .and_then(|()| write!(out, "{config}"))
            .and_then(|()| writeln!(out))
            .and_then(|()| write_data_files(out, config))
            .and_then(|()| {
                writeln!(
                    out,
                    "Config file:   {}",
                    Config::get_config_file_path().display()
                )
            }),
    };
    written.map_err(|e| e.to_string())
}

/// Print the resolved students and courses documents
fn write_data_files(out: &mut impl Write, config: &Config) -> io::Result<()> {
    writeln!(out, "Students file: {}", config.students_path().display())?;
    writeln!(out, "Courses file:  {}", config.courses_path().display())
}

/// Students and courses must live in separate documents
fn check_data_files(config: &Config) -> Result<(), String> {
    let students = config.students_path();
    if students == config.courses_path() {
        return Err(format!(
            "Students and courses would share one file: {}",
            students.display()
        ));
    }
    Ok(())
}

/// Set a key, keeping `config` untouched if the result is unusable
///
/// # Errors
/// Returns a message for an unknown key, an invalid value, or a setting that
/// points both documents at the same file.
pub fn set_value(config: &mut Config, key: &str, value: &str) -> Result<(), String> {
    let mut candidate = config.clone();
    candidate.set(key, value)?;
    check_data_files(&candidate)?;
    *config = candidate;
    Ok(())
}

/// Restore a key to its default, keeping `config` untouched if the result is unusable
///
/// # Errors
/// Returns a message for an unknown key, or when the restored default collides
/// with the other document.
pub fn unset_value(config: &mut Config, defaults: &Config, key: &str) -> Result<(), String> {
    let mut candidate = config.clone();
    candidate.unset(key, defaults)?;
    check_data_files(&candidate)?;
    *config = candidate;
    Ok(())
}

/// Apply a change, persist it, and report where the data files now live
fn update(
    out: &mut impl Write,
    config: &mut Config,
    key: &str,
    change: impl FnOnce(&mut Config) -> Result<(), String>,
) -> Result<(), String> {
    change(config)?;
    config
        .save()
        .map_err(|e| format!("Failed to save config: {e}"))?;

    let value = config.get(key).unwrap_or_default();
    let written = writeln!(out, "✓ {key} = {value}").and_then(|()| {
        if DATA_FILE_KEYS.contains(&key) {
            write_data_files(out, config)
        } else {
            Ok(())
        }
    });
    written.map_err(|e| e.to_string())
}

/// Ask a yes/no question; anything but `y`/`yes` (or end of input) is a no
fn confirm(input: &mut impl BufRead, out: &mut impl Write, prompt: &str) -> io::Result<bool> {
    write!(out, "{prompt} (y/n): ")?;
    out.flush()?;
    let mut response = String::new();
    input.read_line(&mut response)?;
    let response = response.trim();
    Ok(response.eq_ignore_ascii_case("y") || response.eq_ignore_ascii_case("yes"))
}

/// Delete the config file after confirmation
fn reset(input: &mut impl BufRead, out: &mut impl Write) -> Result<(), String> {
    let io_err = |e: io::Error| e.to_string();
    if !Config::get_config_file_path().exists() {
        return writeln!(out, "✓ Config is already at defaults").map_err(io_err);
    }
    if !confirm(input, out, "Reset config to defaults?").map_err(io_err)? {
        return writeln!(out, "✗ Reset cancelled").map_err(io_err);
    }
    Config::reset().map_err(|e| format!("Failed to remove config file: {e}"))?;
    writeln!(out, "✓ Config reset to defaults").map_err(io_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::path::PathBuf;

    fn sample_config() -> Config {
        let mut config = Config::default();
        config.paths.data_dir = "/srv/grades".to_string();
        config.paths.students_file = "students.json".to_string();
        config.paths.courses_file = "courses.json".to_string();
        config
    }

    #[test]
    fn test_set_value_rejects_shared_document() {
        let mut config = sample_config();
        let before = config.clone();

        let err = set_value(&mut config, "courses_file", "students.json").unwrap_err();

        assert!(err.contains("share one file"));
        assert!(err.contains("students.json"));
        assert_eq!(config.paths, before.paths);
    }

    #[test]
    fn test_set_value_moves_documents() {
        let mut config = sample_config();

        set_value(&mut config, "data-dir", "/tmp/term2").unwrap();

        assert_eq!(config.students_path(), PathBuf::from("/tmp/term2/students.json"));
        assert_eq!(config.courses_path(), PathBuf::from("/tmp/term2/courses.json"));
    }

    #[test]
    fn test_set_value_passes_through_key_errors() {
        let mut config = sample_config();

        assert!(set_value(&mut config, "level", "loud").is_err());
        assert!(set_value(&mut config, "colour", "blue").is_err());
    }

    #[test]
    fn test_unset_value_rejects_collision_with_default() {
        let mut defaults = sample_config();
        defaults.paths.courses_file = "roster.json".to_string();
        let mut config = sample_config();
        config.paths.students_file = "roster.json".to_string();
        config.paths.courses_file = "catalog.json".to_string();
        let before = config.clone();

        assert!(unset_value(&mut config, &defaults, "courses_file").is_err());
        assert_eq!(config.paths, before.paths);

        unset_value(&mut config, &defaults, "students_file").unwrap();
        assert_eq!(config.paths.students_file, "students.json");
    }

    #[test]
    fn test_write_config_single_key() {
        let config = sample_config();
        let mut out = Vec::new();

        write_config(&mut out, &config, Some("students-file")).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "students.json\n");
        assert_eq!(
            write_config(&mut Vec::new(), &config, Some("nope")),
            Err("Unknown config key: 'nope'".to_string())
        );
    }

    #[test]
    fn test_write_config_lists_resolved_documents() {
        let config = sample_config();
        let mut out = Vec::new();

        write_config(&mut out, &config, None).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("[paths]"));
        assert!(text.contains("Students file: /srv/grades/students.json"));
        assert!(text.contains("Courses file:  /srv/grades/courses.json"));
        assert!(text.contains("Config file:"));
    }

    #[test]
    fn test_confirm_answers() {
        for (answer, expected) in [("y\n", true), ("YES\n", true), ("n\n", false), ("", false)] {
            let mut out = Vec::new();
            let yes = confirm(&mut Cursor::new(answer), &mut out, "Reset?").unwrap();
            assert_eq!(yes, expected, "answer {answer:?}");
            assert_eq!(String::from_utf8(out).unwrap(), "Reset? (y/n): ");
        }
    }
}
