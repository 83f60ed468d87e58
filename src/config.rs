/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD).
/// Falls back to sensible defaults if the file is missing or incomplete.

use serde::Deserialize;
use std::path::PathBuf;

// ── Public Config Struct ──

#[derive(Clone, Debug)]
pub struct GameConfig {
    /// Milliseconds per simulation tick. 83 matches the Apple II frame
    /// rate the game was written against.
    pub tick_ms: u64,
    pub start_level: u8,
    /// Where the LEVEL<n> blueprint files live.
    pub levels_dir: PathBuf,
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    timing: TomlTiming,
    #[serde(default)]
    game: TomlGame,
}

#[derive(Deserialize, Debug)]
struct TomlTiming {
    #[serde(default = "default_tick_ms")]
    tick_ms: u64,
}

#[derive(Deserialize, Debug)]
struct TomlGame {
    #[serde(default = "default_start_level")]
    start_level: u8,
    #[serde(default = "default_levels_dir")]
    levels_dir: String,
}

fn default_tick_ms() -> u64 {
    83
}
fn default_start_level() -> u8 {
    1
}
fn default_levels_dir() -> String {
    "levels".into()
}

impl Default for TomlTiming {
    fn default() -> Self {
        TomlTiming { tick_ms: default_tick_ms() }
    }
}

impl Default for TomlGame {
    fn default() -> Self {
        TomlGame {
            start_level: default_start_level(),
            levels_dir: default_levels_dir(),
        }
    }
}

// ── Loading ──

impl GameConfig {
    /// Load config from `config.toml`.
    /// Search order: (1) exe directory, (2) current working directory.
    /// Missing file or missing keys gracefully fall back to defaults.
    pub fn load() -> Self {
        let toml_cfg = load_toml(&candidate_dirs());
        GameConfig::from_toml(toml_cfg)
    }

    fn from_toml(t: TomlConfig) -> Self {
        GameConfig {
            tick_ms: t.timing.tick_ms,
            start_level: t.game.start_level,
            levels_dir: PathBuf::from(t.game.levels_dir),
        }
    }
}

/// Candidate directories to search: exe dir + CWD (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }
    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }
    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }
    dirs
}

fn load_toml(search_dirs: &[PathBuf]) -> TomlConfig {
    for dir in search_dirs {
        let path = dir.join("config.toml");
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(text) => return parse_toml(&text),
                Err(e) => {
                    eprintln!("Warning: could not read {}: {e}", path.display());
                }
            }
        }
    }
    TomlConfig::default()
}

fn parse_toml(text: &str) -> TomlConfig {
    match toml::from_str::<TomlConfig>(text) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Warning: config.toml parse error: {e}");
            eprintln!("Using default settings.");
            TomlConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_a_file() {
        let cfg = GameConfig::from_toml(TomlConfig::default());
        assert_eq!(cfg.tick_ms, 83);
        assert_eq!(cfg.start_level, 1);
        assert_eq!(cfg.levels_dir, PathBuf::from("levels"));
    }

    #[test]
    fn partial_file_fills_the_rest() {
        let cfg = GameConfig::from_toml(parse_toml("[game]\nstart_level = 4\n"));
        assert_eq!(cfg.start_level, 4);
        assert_eq!(cfg.tick_ms, 83);
    }

    #[test]
    fn full_file_overrides_everything() {
        let text = "[timing]\ntick_ms = 60\n[game]\nstart_level = 13\nlevels_dir = \"assets\"\n";
        let cfg = GameConfig::from_toml(parse_toml(text));
        assert_eq!(cfg.tick_ms, 60);
        assert_eq!(cfg.start_level, 13);
        assert_eq!(cfg.levels_dir, PathBuf::from("assets"));
    }

    #[test]
    fn broken_toml_falls_back() {
        let cfg = GameConfig::from_toml(parse_toml("not toml at all ["));
        assert_eq!(cfg.tick_ms, 83);
    }
}
