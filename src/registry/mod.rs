//! Fighter and ability registries
//!
//! Name-keyed stores populated once before any duel. Registering a name that
//! already exists replaces the old entry. Lookups of missing names fail with
//! [`NotFound`].

use std::collections::BTreeMap;
use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::combat::{Archetype, Fighter};
use crate::script::{check_script, Instruction, ScriptError};

/// A named, immutable ability script
#[derive(Debug, Clone, PartialEq)]
pub struct Ability {
    pub name: String,
    pub script: Arc<[Instruction]>,
}

impl Ability {
    pub fn new(name: &str, script: Vec<Instruction>) -> Self {
        Self {
            name: name.to_string(),
            script: Arc::from(script),
        }
    }
}

/// Errors that stop setup before any duel can run
#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("invalid archetype for fighter {fighter}: {archetype}")]
    InvalidArchetype { fighter: String, archetype: String },

    #[error("{kind} name must not be empty")]
    EmptyName { kind: &'static str },

    #[error("fighter {fighter} must start with positive hp (got {hp})")]
    InvalidHp { fighter: String, hp: i32 },

    #[error("cannot teach abilities to unregistered fighter {0}")]
    UnknownFighter(String),

    #[error("invalid script for ability {ability}: {source}")]
    InvalidScript {
        ability: String,
        #[source]
        source: ScriptError,
    },
}

/// A lookup for a name that was never registered
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{kind} not found: {name}")]
pub struct NotFound {
    pub kind: &'static str,
    pub name: String,
}

/// Entries that can live in a [`Registry`]
pub trait Named {
    /// Used in error messages ("fighter", "ability")
    const KIND: &'static str;

    fn name(&self) -> &str;
}

impl Named for Fighter {
    const KIND: &'static str = "fighter";

    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for Ability {
    const KIND: &'static str = "ability";

    fn name(&self) -> &str {
        &self.name
    }
}

/// Name-keyed store, iterated in name order
#[derive(Debug, Clone)]
pub struct Registry<T> {
    entries: BTreeMap<String, T>,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<T: Named> Registry<T> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an entry by name
    pub fn insert(&mut self, entry: T) {
        let replaced = self.entries.insert(entry.name().to_string(), entry);
        if let Some(old) = replaced {
            debug!(kind = T::KIND, name = old.name(), "registry entry replaced");
        }
    }

    /// Look up an entry by name
    pub fn lookup(&self, name: &str) -> Result<&T, NotFound> {
        self.entries.get(name).ok_or_else(|| NotFound {
            kind: T::KIND,
            name: name.to_string(),
        })
    }

    /// Look up an entry, if present
    pub fn get(&self, name: &str) -> Option<&T> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Fighter templates, cloned into duels
pub type FighterRegistry = Registry<Fighter>;

/// Ability scripts, read on every turn
pub type AbilityRegistry = Registry<Ability>;

impl Registry<Fighter> {
    /// Register a fighter from its definition fields
    pub fn register(
        &mut self,
        name: &str,
        archetype: &str,
        base_hp: i32,
    ) -> Result<(), RegistrationError> {
        if name.is_empty() {
            return Err(RegistrationError::EmptyName { kind: Fighter::KIND });
        }
        let archetype: Archetype =
            archetype
                .parse()
                .map_err(|_| RegistrationError::InvalidArchetype {
                    fighter: name.to_string(),
                    archetype: archetype.to_string(),
                })?;
        if base_hp <= 0 {
            return Err(RegistrationError::InvalidHp {
                fighter: name.to_string(),
                hp: base_hp,
            });
        }

        debug!(name, %archetype, base_hp, "fighter registered");
        self.insert(Fighter::new(name, archetype, base_hp));
        Ok(())
    }

    /// Append ability names to a fighter's learned list, unvalidated
    pub fn learn<I, S>(&mut self, fighter: &str, abilities: I) -> Result<(), RegistrationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entry = self
            .entries
            .get_mut(fighter)
            .ok_or_else(|| RegistrationError::UnknownFighter(fighter.to_string()))?;
        entry.learn(abilities);
        debug!(fighter, learned = entry.abilities.len(), "abilities learned");
        Ok(())
    }
}

impl Registry<Ability> {
    /// Register an ability after checking its script
    pub fn register(&mut self, name: &str, script: Vec<Instruction>) -> Result<(), RegistrationError> {
        if name.is_empty() {
            return Err(RegistrationError::EmptyName { kind: Ability::KIND });
        }
        check_script(&script).map_err(|source| RegistrationError::InvalidScript {
            ability: name.to_string(),
            source,
        })?;

        debug!(name, instructions = script.len(), "ability registered");
        self.insert(Ability::new(name, script));
        Ok(())
    }
}
