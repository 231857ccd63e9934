//! Runtime configuration: CLI flags, falling back to environment variables.
//!
//! | Flag | Variable | Default |
//! |------|----------|---------|
//! | `--data <path>` | `GEOQUIZ_DATA` | `data/quizCapitals.json` |
//! | `--dict <path>` | `GEOQUIZ_DICT` | `data/translations.json` |
//! | `--map-image <path>` | `GEOQUIZ_MAP_IMAGE` | none |
//! | `--lang <en\|nl>` | `GEOQUIZ_LANG` | `nl` |
//! | `--seed <n>` | `GEOQUIZ_SEED` | clock |
//! | `--avoid-repeats` | `GEOQUIZ_AVOID_REPEATS` | off |
//! | `--log <path>` | `GEOQUIZ_LOG_PATH` | none (logging off) |

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::builder::BoolishValueParser;
use clap::Parser;

use crate::core::SessionConfig;
use crate::data::DataPaths;
use crate::types::Language;

pub const DEFAULT_DATA: &str = "data/quizCapitals.json";
pub const DEFAULT_DICT: &str = "data/translations.json";

const KEYS: &str = "\
keys: type the capital, Enter submit, F2 hint, F3 skip, F4 language,
      F5-F7 pick a choice, Esc close celebration / quit, Ctrl+C quit";

#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "geoquiz", version, about = "Terminal capital quiz", after_help = KEYS)]
pub struct QuizConfig {
    /// Capitals dataset (JSON)
    #[arg(long, env = "GEOQUIZ_DATA", default_value = DEFAULT_DATA)]
    pub data: PathBuf,

    /// Translation dictionary (JSON)
    #[arg(long, env = "GEOQUIZ_DICT", default_value = DEFAULT_DICT)]
    pub dict: PathBuf,

    /// Reference map drawn under the markers (PNG)
    #[arg(long, env = "GEOQUIZ_MAP_IMAGE")]
    pub map_image: Option<PathBuf>,

    /// Display language: en or nl
    #[arg(long = "lang", env = "GEOQUIZ_LANG", default_value = "nl", value_parser = parse_language)]
    pub language: Language,

    /// Question order seed; taken from the clock when unset
    #[arg(long, env = "GEOQUIZ_SEED")]
    pub seed: Option<u32>,

    /// Avoid asking the same capital twice in a row
    #[arg(long, env = "GEOQUIZ_AVOID_REPEATS", value_parser = BoolishValueParser::new())]
    pub avoid_repeats: bool,

    /// Write logs to this file
    #[arg(long = "log", env = "GEOQUIZ_LOG_PATH")]
    pub log_path: Option<PathBuf>,
}

fn parse_language(s: &str) -> Result<Language, String> {
    Language::from_str(s).ok_or_else(|| format!("unknown language `{s}` (expected en or nl)"))
}

impl QuizConfig {
    pub fn data_paths(&self) -> DataPaths {
        let paths = DataPaths::new(&self.data, &self.dict);
        match &self.map_image {
            Some(p) => paths.with_map_image(p),
            None => paths,
        }
    }

    /// Session settings; an unset seed is taken from the clock.
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            seed: self.seed.unwrap_or_else(clock_seed),
            language: self.language,
            avoid_repeats: self.avoid_repeats,
        }
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, MutexGuard};

    const VARS: [&str; 7] = [
        "GEOQUIZ_DATA",
        "GEOQUIZ_DICT",
        "GEOQUIZ_MAP_IMAGE",
        "GEOQUIZ_LANG",
        "GEOQUIZ_SEED",
        "GEOQUIZ_AVOID_REPEATS",
        "GEOQUIZ_LOG_PATH",
    ];

    // Tests share the process environment.
    static ENV: Mutex<()> = Mutex::new(());

    fn env(pairs: &[(&str, &str)]) -> MutexGuard<'static, ()> {
        let guard = ENV.lock().unwrap_or_else(|e| e.into_inner());
        for var in VARS {
            std::env::remove_var(var);
        }
        for (key, value) in pairs {
            std::env::set_var(key, value);
        }
        guard
    }

    fn parse(args: &[&str]) -> Result<QuizConfig, clap::Error> {
        QuizConfig::try_parse_from(std::iter::once("geoquiz").chain(args.iter().copied()))
    }

    #[test]
    fn test_defaults() {
        let _env = env(&[]);
        let c = parse(&[]).unwrap();
        assert_eq!(c.language, Language::Dutch);
        assert_eq!(c.data, PathBuf::from(DEFAULT_DATA));
        assert_eq!(c.dict, PathBuf::from(DEFAULT_DICT));
        assert_eq!(c.map_image, None);
        assert_eq!(c.seed, None);
        assert!(!c.avoid_repeats);
        assert_eq!(c.log_path, None);
    }

    #[test]
    fn test_env_over_defaults() {
        let _env = env(&[
            ("GEOQUIZ_DATA", "/tmp/q.json"),
            ("GEOQUIZ_LANG", "EN"),
            ("GEOQUIZ_SEED", "42"),
            ("GEOQUIZ_AVOID_REPEATS", "yes"),
        ]);
        let c = parse(&[]).unwrap();
        assert_eq!(c.data, PathBuf::from("/tmp/q.json"));
        assert_eq!(c.dict, PathBuf::from(DEFAULT_DICT));
        assert_eq!(c.language, Language::English);
        assert_eq!(c.seed, Some(42));
        assert!(c.avoid_repeats);
    }

    #[test]
    fn test_flags_override_env() {
        let _env = env(&[("GEOQUIZ_LANG", "en"), ("GEOQUIZ_SEED", "1")]);
        let c = parse(&["--lang", "nl", "--seed", "7", "--map-image", "map.png"]).unwrap();
        assert_eq!(c.language, Language::Dutch);
        assert_eq!(c.seed, Some(7));
        assert_eq!(c.session_config().seed, 7);
        assert_eq!(c.data_paths().map_image, Some(PathBuf::from("map.png")));
    }

    #[test]
    fn test_bad_flags() {
        let _env = env(&[]);
        assert!(parse(&["--seed"]).is_err());
        assert!(parse(&["--seed", "-3"]).is_err());
        assert!(parse(&["--lang", "fr"]).is_err());
        assert!(parse(&["--bogus"]).is_err());
        let help = parse(&["--help"]).unwrap_err();
        assert_eq!(help.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_bad_env_value_is_rejected() {
        let _env = env(&[("GEOQUIZ_AVOID_REPEATS", "sometimes")]);
        assert!(parse(&[]).is_err());
    }
}
