//! Game file loading
//!
//! A game file is JSON holding the ability definitions, the fighter roster and
//! the learn bindings. Installing it registers abilities first, then fighters,
//! then learn bindings, each in file order.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::registry::{AbilityRegistry, FighterRegistry, RegistrationError};
use crate::script::Instruction;

/// Errors loading or installing a game file
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid game file: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Registration(#[from] RegistrationError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbilityDef {
    pub name: String,
    #[serde(default)]
    pub script: Vec<Instruction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FighterDef {
    pub name: String,
    /// Archetype name, checked at registration
    pub archetype: String,
    pub hp: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearnDef {
    pub fighter: String,
    pub abilities: Vec<String>,
}

/// Contents of a game file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameDefinition {
    pub abilities: Vec<AbilityDef>,
    pub fighters: Vec<FighterDef>,
    pub learn: Vec<LearnDef>,
}

/// Populated registries, ready for duels
#[derive(Debug, Clone, Default)]
pub struct Roster {
    pub fighters: FighterRegistry,
    pub abilities: AbilityRegistry,
}

impl GameDefinition {
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, LoadError> {
        let json = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Register everything into fresh registries. Stops at the first error.
    pub fn install(&self) -> Result<Roster, RegistrationError> {
        let mut roster = Roster::default();

        for def in &self.abilities {
            roster.abilities.register(&def.name, def.script.clone())?;
        }
        for def in &self.fighters {
            roster.fighters.register(&def.name, &def.archetype, def.hp)?;
        }
        for def in &self.learn {
            roster.fighters.learn(&def.fighter, def.abilities.iter().cloned())?;
        }

        info!(
            fighters = roster.fighters.len(),
            abilities = roster.abilities.len(),
            "Game definition installed"
        );
        Ok(roster)
    }
}

/// Read and install a game file
pub fn load_game(path: &Path) -> Result<Roster, LoadError> {
    Ok(GameDefinition::from_file(path)?.install()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::Selector;
    use std::io::Write;

    const GAME: &str = r#"{
        "abilities": [
            {"name": "Head_Smash", "script": [{"damage": {"target": "defender", "amount": 22}}]},
            {"name": "Catch_A_Break", "script": [{"heal": {"target": "attacker", "amount": 30}}]}
        ],
        "fighters": [
            {"name": "Lee", "archetype": "Rushdown", "hp": 100},
            {"name": "Jack-6", "archetype": "Heavy", "hp": 90}
        ],
        "learn": [
            {"fighter": "Lee", "abilities": ["Head_Smash", "Catch_A_Break"]},
            {"fighter": "Jack-6", "abilities": ["Head_Smash"]}
        ]
    }"#;

    #[test]
    fn test_install_game() {
        let roster = GameDefinition::from_json(GAME).unwrap().install().unwrap();

        assert_eq!(roster.abilities.len(), 2);
        assert_eq!(
            roster.fighters.names().collect::<Vec<_>>(),
            vec!["Jack-6", "Lee"]
        );
        assert_eq!(
            roster.fighters.lookup("Lee").unwrap().abilities,
            vec!["Head_Smash", "Catch_A_Break"]
        );
        assert_eq!(
            &roster.abilities.lookup("Head_Smash").unwrap().script[..],
            &[Instruction::damage(Selector::Defender, 22)]
        );
    }

    #[test]
    fn test_missing_sections_default_empty() {
        let game = GameDefinition::from_json("{}").unwrap();
        assert_eq!(game, GameDefinition::default());
        assert!(game.install().unwrap().fighters.is_empty());
    }

    #[test]
    fn test_invalid_archetype_stops_install() {
        let game = GameDefinition::from_json(
            r#"{"fighters": [{"name": "Dhalsim", "archetype": "Zoner", "hp": 90}]}"#,
        )
        .unwrap();
        assert!(matches!(
            game.install(),
            Err(RegistrationError::InvalidArchetype { .. })
        ));
    }

    #[test]
    fn test_learn_for_unknown_fighter() {
        let game = GameDefinition::from_json(
            r#"{"learn": [{"fighter": "Nobody", "abilities": ["Head_Smash"]}]}"#,
        )
        .unwrap();
        assert!(matches!(
            game.install(),
            Err(RegistrationError::UnknownFighter(_))
        ));
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(
            GameDefinition::from_json("{\"fighters\": 3}"),
            Err(LoadError::Json(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(GAME.as_bytes()).unwrap();

        let roster = load_game(file.path()).unwrap();
        assert!(roster.fighters.contains("Jack-6"));

        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(load_game(&missing), Err(LoadError::Io { .. })));
    }
}
