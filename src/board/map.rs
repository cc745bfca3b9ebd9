//! Board map: territories, frontiers, and continents.
//!
//! A `BoardMap` is built once from a `MapDefinition`, validated, and then
//! shared read-only (behind an `Arc`) by every game state derived from it.
//! Territories are identified by their index in the name-sorted territory
//! list, which keeps per-territory state in flat arrays.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Index of a territory in its map's sorted territory list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Territory(pub u16);

impl Territory {
    /// Returns the index of this territory as a `usize` for array access.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Index of a continent in its map's sorted continent list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Continent(pub u16);

impl Continent {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Errors raised while validating a map definition.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MapError {
    #[error("invalid map definition: expected at least 2 territories, got {0}")]
    TooFewTerritories(usize),

    #[error("invalid map definition: {0} territories exceed the supported maximum")]
    TooManyTerritories(usize),

    #[error("invalid map definition: territory '{0}' is declared twice")]
    DuplicateTerritory(String),

    #[error("invalid map definition: territory '{0}' has no frontiers")]
    NoFrontiers(String),

    #[error("invalid map definition: territory '{territory}' borders unknown '{frontier}'")]
    UnknownFrontier { territory: String, frontier: String },

    #[error("invalid map definition: territory '{0}' has a frontier with itself")]
    SelfFrontier(String),

    #[error("invalid map definition: continent '{0}' has no territories")]
    EmptyContinent(String),

    #[error("invalid map definition: continent '{continent}' has unknown territory '{territory}'")]
    UnknownContinentTerritory { continent: String, territory: String },

    #[error("invalid map definition: bonus defined for unknown continent '{0}'")]
    UnknownBonusContinent(String),
}

/// Declarative description of a map, as loaded from data files.
///
/// `territories` maps each territory name to the names of its adjacent
/// territories. `continents` maps continent names to member territories and
/// `bonuses` assigns reinforcement bonuses to continents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapDefinition {
    pub territories: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub continents: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub bonuses: BTreeMap<String, u32>,
}

impl MapDefinition {
    /// Builds a definition from static tables, rejecting duplicate territory names.
    pub fn from_tables(
        territories: &[(&str, &[&str])],
        continents: &[(&str, &[&str])],
        bonuses: &[(&str, u32)],
    ) -> Result<Self, MapError> {
        let mut def = MapDefinition::default();
        for (name, frontiers) in territories {
            let adj = frontiers.iter().map(|f| f.to_string()).collect();
            if def.territories.insert(name.to_string(), adj).is_some() {
                return Err(MapError::DuplicateTerritory(name.to_string()));
            }
        }
        for (name, members) in continents {
            def.continents.insert(
                name.to_string(),
                members.iter().map(|m| m.to_string()).collect(),
            );
        }
        for (name, bonus) in bonuses {
            def.bonuses.insert(name.to_string(), *bonus);
        }
        Ok(def)
    }
}

/// A continent of the map with its member territories and bonus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContinentInfo {
    pub name: String,
    pub territories: Vec<Territory>,
    pub bonus: u32,
}

/// Immutable, validated territory graph.
#[derive(Debug)]
pub struct BoardMap {
    names: Vec<String>,
    index: HashMap<String, Territory>,
    /// Neighbours of each territory, in declaration order.
    adjacents: Vec<Vec<Territory>>,
    /// Row-major `n * n` adjacency matrix for O(1) lookup.
    matrix: Vec<bool>,
    continents: Vec<ContinentInfo>,
    continent_of: Vec<Option<Continent>>,
}

impl BoardMap {
    /// Validates a definition and builds the map.
    ///
    /// Checks, in order: at least two territories; every territory has at
    /// least one frontier, all frontiers name declared territories and none
    /// points back at itself; every continent is non-empty and lists only
    /// declared territories; every bonus names a declared continent.
    pub fn new(def: MapDefinition) -> Result<Self, MapError> {
        let count = def.territories.len();
        if count < 2 {
            return Err(MapError::TooFewTerritories(count));
        }
        if count > u16::MAX as usize {
            return Err(MapError::TooManyTerritories(count));
        }

        // BTreeMap iteration order is the sorted territory order.
        let names: Vec<String> = def.territories.keys().cloned().collect();
        let index: HashMap<String, Territory> = names
            .iter()
            .enumerate()
            .map(|(i, n)| (n.clone(), Territory(i as u16)))
            .collect();

        let mut adjacents = Vec::with_capacity(count);
        let mut matrix = vec![false; count * count];
        for (i, (name, frontiers)) in def.territories.iter().enumerate() {
            if frontiers.is_empty() {
                return Err(MapError::NoFrontiers(name.clone()));
            }
            let mut adj = Vec::with_capacity(frontiers.len());
            for frontier in frontiers {
                let to = *index.get(frontier).ok_or_else(|| MapError::UnknownFrontier {
                    territory: name.clone(),
                    frontier: frontier.clone(),
                })?;
                if to.index() == i {
                    return Err(MapError::SelfFrontier(name.clone()));
                }
                let cell = &mut matrix[i * count + to.index()];
                if !*cell {
                    *cell = true;
                    adj.push(to);
                }
            }
            adjacents.push(adj);
        }

        let mut continents = Vec::with_capacity(def.continents.len());
        let mut continent_of = vec![None; count];
        for (ci, (name, members)) in def.continents.iter().enumerate() {
            if members.is_empty() {
                return Err(MapError::EmptyContinent(name.clone()));
            }
            let mut territories = Vec::with_capacity(members.len());
            for member in members {
                let t = *index.get(member).ok_or_else(|| MapError::UnknownContinentTerritory {
                    continent: name.clone(),
                    territory: member.clone(),
                })?;
                if !territories.contains(&t) {
                    territories.push(t);
                }
                continent_of[t.index()].get_or_insert(Continent(ci as u16));
            }
            continents.push(ContinentInfo {
                name: name.clone(),
                territories,
                bonus: 0,
            });
        }

        for (name, bonus) in &def.bonuses {
            let info = continents
                .iter_mut()
                .find(|c| &c.name == name)
                .ok_or_else(|| MapError::UnknownBonusContinent(name.clone()))?;
            info.bonus = *bonus;
        }

        Ok(BoardMap {
            names,
            index,
            adjacents,
            matrix,
            continents,
            continent_of,
        })
    }

    /// Convenience constructor from static tables.
    pub fn from_tables(
        territories: &[(&str, &[&str])],
        continents: &[(&str, &[&str])],
        bonuses: &[(&str, u32)],
    ) -> Result<Self, MapError> {
        BoardMap::new(MapDefinition::from_tables(territories, continents, bonuses)?)
    }

    /// Number of territories on the map.
    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Always false: a valid map has at least two territories.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// All territories, sorted by name.
    pub fn territories(&self) -> impl Iterator<Item = Territory> + '_ {
        (0..self.names.len()).map(|i| Territory(i as u16))
    }

    /// Returns true if the territory index belongs to this map.
    #[inline]
    pub fn contains(&self, t: Territory) -> bool {
        t.index() < self.names.len()
    }

    /// Name of a territory.
    pub fn name(&self, t: Territory) -> &str {
        &self.names[t.index()]
    }

    /// Looks up a territory by name.
    pub fn territory(&self, name: &str) -> Option<Territory> {
        self.index.get(name).copied()
    }

    /// True if `to` is listed as a frontier of `from`.
    #[inline]
    pub fn adjacent(&self, from: Territory, to: Territory) -> bool {
        let n = self.names.len();
        from.index() < n && to.index() < n && self.matrix[from.index() * n + to.index()]
    }

    /// Territories adjacent to `t`.
    pub fn neighbours(&self, t: Territory) -> &[Territory] {
        &self.adjacents[t.index()]
    }

    /// Every directed pair of adjacent territories.
    pub fn frontiers(&self) -> impl Iterator<Item = (Territory, Territory)> + '_ {
        self.adjacents
            .iter()
            .enumerate()
            .flat_map(|(i, adj)| adj.iter().map(move |&to| (Territory(i as u16), to)))
    }

    /// All continents, sorted by name.
    pub fn continents(&self) -> &[ContinentInfo] {
        &self.continents
    }

    pub fn continent(&self, c: Continent) -> &ContinentInfo {
        &self.continents[c.index()]
    }

    /// Looks up a continent by name.
    pub fn continent_by_name(&self, name: &str) -> Option<Continent> {
        self.continents
            .iter()
            .position(|c| c.name == name)
            .map(|i| Continent(i as u16))
    }

    /// The continent a territory belongs to, if any. A territory listed in
    /// several continents reports the first one by name.
    pub fn continent_of(&self, t: Territory) -> Option<Continent> {
        self.continent_of.get(t.index()).copied().flatten()
    }

    /// Sum of the reinforcement bonuses of the given continents.
    pub fn bonus(&self, continents: &[Continent]) -> u32 {
        continents
            .iter()
            .filter_map(|c| self.continents.get(c.index()))
            .fold(0u32, |sum, c| sum.saturating_add(c.bonus))
    }

    /// Sum of every continent bonus on the map.
    pub fn total_bonus(&self) -> u32 {
        self.continents
            .iter()
            .fold(0u32, |sum, c| sum.saturating_add(c.bonus))
    }

    /// Rebuilds the declarative definition this map was validated from.
    pub fn definition(&self) -> MapDefinition {
        let territories = self
            .names
            .iter()
            .zip(&self.adjacents)
            .map(|(name, adj)| {
                let frontiers = adj.iter().map(|t| self.names[t.index()].clone()).collect();
                (name.clone(), frontiers)
            })
            .collect();
        let continents = self
            .continents
            .iter()
            .map(|c| {
                let members = c.territories.iter().map(|t| self.names[t.index()].clone()).collect();
                (c.name.clone(), members)
            })
            .collect();
        let bonuses = self
            .continents
            .iter()
            .filter(|c| c.bonus > 0)
            .map(|c| (c.name.clone(), c.bonus))
            .collect();
        MapDefinition {
            territories,
            continents,
            bonuses,
        }
    }
}
