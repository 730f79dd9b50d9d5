//! Engine configuration.
//!
//! Loaded from TOML with every field defaulted, then overridden from the
//! environment (`KRK_<SECTION>_<KEY>`). Command-line flags are applied on top
//! by the binary.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::errors::{EndgameError, EndgameResult};
use crate::game_state::chess_rules::DEFAULT_MAX_MOVES;
use crate::game_state::chess_types::Side;
use crate::search::alpha_beta::SearchConfig;
use crate::search::board_scoring::{AttackerWeights, DefenderWeights};
use crate::utils::transcript::DEFAULT_TRANSCRIPT_PATH;

pub const CONFIG_ENV_VAR: &str = "KRK_CONFIG";
pub const CONFIG_FILE_NAME: &str = "krk.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Full moves (one ply per side) before the game is drawn.
    pub max_moves: u32,
    /// Seed for the engines' tie-break randomness. `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Transcript file; `None` disables the transcript.
    pub transcript_path: Option<PathBuf>,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            max_moves: DEFAULT_MAX_MOVES,
            seed: None,
            transcript_path: Some(PathBuf::from(DEFAULT_TRANSCRIPT_PATH)),
        }
    }
}

impl GameSettings {
    pub fn ply_limit(&self) -> u32 {
        self.max_moves.saturating_mul(2)
    }

    /// Per-side seed so the two engines do not share a random stream.
    pub fn seed_for(&self, side: Side) -> Option<u64> {
        self.seed.map(|seed| match side {
            Side::Attacker => seed,
            Side::Defender => seed.wrapping_add(1),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub search: SearchConfig,
    pub attacker: AttackerWeights,
    pub defender: DefenderWeights,
    pub game: GameSettings,
}

impl EngineConfig {
    pub fn validate(&self) -> EndgameResult<()> {
        self.search.validate()?;
        if self.game.max_moves == 0 {
            return Err(EndgameError::InvalidArgument(
                "game.max_moves must be at least 1".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Load configuration from `explicit`, else `$KRK_CONFIG`, else `krk.toml`
/// in the working directory, else defaults. Environment overrides are
/// applied in every case.
pub fn load_config(explicit: Option<&Path>) -> EndgameResult<EngineConfig> {
    if let Some(path) = explicit {
        info!("Loading config from {}", path.display());
        return load_from_path(path);
    }

    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        let path = PathBuf::from(path);
        if path.exists() {
            info!("Loading config from {CONFIG_ENV_VAR}: {}", path.display());
            return load_from_path(&path);
        }
        warn!(
            "{CONFIG_ENV_VAR}={} not found, searching defaults",
            path.display()
        );
    }

    let local = Path::new(CONFIG_FILE_NAME);
    if local.exists() {
        info!("Loading config from {}", local.display());
        return load_from_path(local);
    }

    debug!("No {CONFIG_FILE_NAME} found, using built-in defaults");
    Ok(apply_env_overrides(EngineConfig::default()))
}

pub fn load_from_path(path: &Path) -> EndgameResult<EngineConfig> {
    let content = std::fs::read_to_string(path)?;
    let config = parse_config(&content)?;
    Ok(apply_env_overrides(config))
}

pub fn parse_config(content: &str) -> EndgameResult<EngineConfig> {
    Ok(toml::from_str(content)?)
}

macro_rules! env_override {
    ($lookup:expr, $config:expr, $section:ident . $field:ident, $key:expr, parse) => {
        if let Some(raw) = $lookup($key) {
            match raw.parse() {
                Ok(value) => $config.$section.$field = value,
                Err(_) => warn!("Ignoring {}={}: not a valid value", $key, raw),
            }
        }
    };
    ($lookup:expr, $config:expr, $section:ident . $field:ident, $key:expr, optional_parse) => {
        if let Some(raw) = $lookup($key) {
            match raw.parse() {
                Ok(value) => $config.$section.$field = Some(value),
                Err(_) => warn!("Ignoring {}={}: not a valid value", $key, raw),
            }
        }
    };
}

pub fn apply_env_overrides(config: EngineConfig) -> EngineConfig {
    apply_overrides_from(config, |key| std::env::var(key).ok())
}

/// Apply `KRK_*` overrides read through `lookup`.
pub fn apply_overrides_from(
    mut config: EngineConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> EngineConfig {
    env_override!(lookup, config, search.max_depth, "KRK_SEARCH_MAX_DEPTH", parse);
    env_override!(lookup, config, game.max_moves, "KRK_GAME_MAX_MOVES", parse);
    env_override!(lookup, config, game.seed, "KRK_GAME_SEED", optional_parse);
    env_override!(
        lookup,
        config,
        game.transcript_path,
        "KRK_GAME_TRANSCRIPT",
        optional_parse
    );
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = parse_config("").expect("empty config should parse");
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.search.max_depth, 4);
        assert_eq!(config.game.max_moves, 35);
        assert_eq!(config.game.ply_limit(), 70);
        assert_eq!(config.search.cycle_window.min_lag, 4);
        assert_eq!(config.search.cycle_window.max_lag, 8);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = parse_config(
            r#"
[search]
max_depth = 3

[attacker]
checkmate_bonus = 5000.0

[game]
seed = 42
"#,
        )
        .expect("config should parse");

        assert_eq!(config.search.max_depth, 3);
        assert_eq!(config.attacker.checkmate_bonus, 5000.0);
        assert_eq!(config.attacker.edge, AttackerWeights::default().edge);
        assert_eq!(config.defender, DefenderWeights::default());
        assert_eq!(config.game.seed_for(Side::Attacker), Some(42));
        assert_eq!(config.game.seed_for(Side::Defender), Some(43));
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        let err = parse_config("[search\nmax_depth = ").expect_err("broken toml");
        assert!(matches!(err, EndgameError::Config(_)));
    }

    #[test]
    fn environment_overrides_apply_and_bad_values_are_ignored() {
        let vars = [
            ("KRK_SEARCH_MAX_DEPTH", "2"),
            ("KRK_GAME_MAX_MOVES", "not-a-number"),
            ("KRK_GAME_SEED", "7"),
            ("KRK_GAME_TRANSCRIPT", "out/log.txt"),
        ];
        let lookup = |key: &str| {
            vars.iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (*value).to_owned())
        };

        let config = apply_overrides_from(EngineConfig::default(), lookup);
        assert_eq!(config.search.max_depth, 2);
        assert_eq!(config.game.max_moves, 35);
        assert_eq!(config.game.seed, Some(7));
        assert_eq!(
            config.game.transcript_path,
            Some(PathBuf::from("out/log.txt"))
        );
    }

    #[test]
    fn validation_rejects_zero_budgets() {
        let mut config = EngineConfig::default();
        assert!(config.validate().is_ok());
        config.game.max_moves = 0;
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.search.max_depth = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_explicit_file_is_an_io_error() {
        let err = load_config(Some(Path::new("/definitely/not/here/krk.toml")))
            .expect_err("missing file");
        assert!(matches!(err, EndgameError::Io(_)));
    }
}
