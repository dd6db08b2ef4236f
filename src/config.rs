use log::info;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use crate::book::OpeningBook;
use crate::error::Result;
use crate::player::AiPlayer;

/// Engine settings. Loaded from JSON, then `ELOBOT_*` environment variables,
/// then command-line flags, each overriding the previous.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub rating: i32,
    pub own_book: bool,
    pub book_file: Option<PathBuf>,
    pub think_ms: Option<u64>,
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { rating: 1200, own_book: true, book_file: None, think_ms: None, seed: None }
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> { std::env::var(name).ok().and_then(|s| s.trim().parse().ok()) }

impl EngineConfig {
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let conf = serde_json::from_str(&text)?;
        info!("config loaded from {}", path.as_ref().display());
        Ok(conf)
    }

    /// Applies `ELOBOT_RATING`, `ELOBOT_THINK_MS` and `ELOBOT_SEED` when set
    /// and parseable.
    pub fn apply_env(mut self) -> Self {
        if let Some(r) = env_parse("ELOBOT_RATING") { self.rating = r; }
        if let Some(t) = env_parse("ELOBOT_THINK_MS") { self.think_ms = Some(t); }
        if let Some(s) = env_parse("ELOBOT_SEED") { self.seed = Some(s); }
        self
    }

    /// The configured book (`book_file`, or the built-in lines) regardless of
    /// `own_book`.
    pub fn load_book(&self) -> Result<OpeningBook> {
        match &self.book_file {
            Some(p) => OpeningBook::from_json_file(p),
            None => Ok(OpeningBook::standard()),
        }
    }

    /// The book to play with, `None` when `own_book` is off.
    pub fn book(&self) -> Result<Option<OpeningBook>> {
        if !self.own_book { return Ok(None); }
        self.load_book().map(Some)
    }

    pub fn build_player(&self) -> Result<AiPlayer> {
        let seed = self.seed.unwrap_or_else(rand::random);
        let mut ai = AiPlayer::new(self.rating, seed);
        ai.set_book(self.book()?);
        if let Some(ms) = self.think_ms { ai = ai.with_think_limit(Duration::from_millis(ms)); }
        Ok(ai)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_fills_defaults() {
        let conf: EngineConfig = serde_json::from_str(r#"{"rating": 1850, "think_ms": 500}"#).unwrap();
        assert_eq!(conf.rating, 1850);
        assert_eq!(conf.think_ms, Some(500));
        assert!(conf.own_book);
        assert_eq!(conf.seed, None);
    }

    #[test]
    fn book_disabled_yields_none() {
        let conf = EngineConfig { own_book: false, ..EngineConfig::default() };
        assert!(conf.book().unwrap().is_none());
        let player = conf.build_player().unwrap();
        assert_eq!(player.strength().rating, 1200);
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("elobot-{}-{}", std::process::id(), name))
    }

    #[test]
    fn json_file_round_trip() {
        let path = temp_path("config.json");
        let conf = EngineConfig { rating: 1725, own_book: false, book_file: None, think_ms: Some(250), seed: Some(9) };
        std::fs::write(&path, serde_json::to_string_pretty(&conf).unwrap()).unwrap();
        let loaded = EngineConfig::from_json_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded, conf);
        assert!(EngineConfig::from_json_file(temp_path("missing.json")).is_err());
    }

    #[test]
    fn book_file_is_loaded_when_configured() {
        let path = temp_path("book.json");
        std::fs::write(&path, r#"{"lines": [{"name": "Polish", "moves": ["b2b4", "e7e5"]}]}"#).unwrap();
        let conf = EngineConfig { book_file: Some(path.clone()), ..EngineConfig::default() };
        let book = conf.book().unwrap().expect("book enabled");
        let disabled = EngineConfig { own_book: false, ..conf.clone() };
        let still_loadable = disabled.load_book().unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(book.len(), 1);
        assert_eq!(book.lines[0].moves, vec!["b2b4".to_string(), "e7e5".to_string()]);
        assert!(disabled.book().unwrap().is_none());
        assert_eq!(still_loadable.lines, book.lines);
    }

    // The only test in this crate that touches ELOBOT_* variables.
    #[test]
    fn environment_overrides_file_values() {
        let base = EngineConfig { rating: 1500, ..EngineConfig::default() };
        std::env::set_var("ELOBOT_RATING", "1900");
        std::env::set_var("ELOBOT_THINK_MS", "750");
        std::env::set_var("ELOBOT_SEED", "not-a-number");
        let conf = base.clone().apply_env();
        std::env::remove_var("ELOBOT_RATING");
        std::env::remove_var("ELOBOT_THINK_MS");
        std::env::remove_var("ELOBOT_SEED");
        assert_eq!(conf.rating, 1900);
        assert_eq!(conf.think_ms, Some(750));
        // Unparseable values are ignored
        assert_eq!(conf.seed, None);
        assert_eq!(base.apply_env().rating, 1500);
    }
}
