//! PokeAPI data models
//!
//! This module contains the response shapes returned by PokeAPI for location
//! listings, location-area details and Pokemon records. Fields the CLI does not
//! use are ignored during decoding; collections default to empty.

pub mod client;

pub use client::{ApiError, PokeApiClient, DEFAULT_BASE_URL};

use serde::{Deserialize, Serialize};

/// A name/URL pair pointing at another PokeAPI resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}

/// One page of the location-area listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationPage {
    /// Total number of location areas across all pages
    #[serde(default)]
    pub count: u32,
    /// URL of the following page, if any
    pub next: Option<String>,
    /// URL of the preceding page, if any
    pub previous: Option<String>,
    /// Location areas on this page
    #[serde(default)]
    pub results: Vec<NamedResource>,
}

/// Details of a single location area, including which Pokemon appear there
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationArea {
    #[serde(default)]
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub game_index: u32,
    pub location: Option<NamedResource>,
    #[serde(default)]
    pub encounter_method_rates: Vec<EncounterMethodRate>,
    #[serde(default)]
    pub names: Vec<LocalizedName>,
    #[serde(default)]
    pub pokemon_encounters: Vec<PokemonEncounter>,
}

impl LocationArea {
    /// Names of the Pokemon that can be encountered, in response order
    pub fn pokemon_names(&self) -> impl Iterator<Item = &str> {
        self.pokemon_encounters
            .iter()
            .map(|encounter| encounter.pokemon.name.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterMethodRate {
    pub encounter_method: NamedResource,
    #[serde(default)]
    pub version_details: Vec<EncounterRateVersion>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterRateVersion {
    pub rate: u32,
    pub version: NamedResource,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalizedName {
    pub name: String,
    pub language: NamedResource,
}

/// A Pokemon that can be found in a location area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PokemonEncounter {
    pub pokemon: NamedResource,
    #[serde(default)]
    pub version_details: Vec<EncounterVersion>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterVersion {
    pub version: NamedResource,
    #[serde(default)]
    pub max_chance: u32,
    #[serde(default)]
    pub encounter_details: Vec<EncounterDetail>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterDetail {
    pub min_level: u32,
    pub max_level: u32,
    #[serde(default)]
    pub condition_values: Vec<serde_json::Value>,
    pub chance: u32,
    pub method: NamedResource,
}

/// A Pokemon record as returned by `/pokemon/{name}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pokemon {
    #[serde(default)]
    pub id: u32,
    pub name: String,
    /// Experience gained for defeating this Pokemon; drives catch odds.
    /// PokeAPI reports `null` for some alternate forms.
    pub base_experience: Option<u32>,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub weight: u32,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub stats: Vec<PokemonStat>,
    #[serde(default)]
    pub types: Vec<PokemonType>,
}

/// A base stat value such as hp or speed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonStat {
    pub base_stat: u32,
    #[serde(default)]
    pub effort: u32,
    pub stat: NamedResource,
}

/// One of a Pokemon's elemental types
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonType {
    pub slot: u8,
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_page_decodes_null_cursors() {
        let json = r#"{
            "count": 1089,
            "next": "https://pokeapi.co/api/v2/location-area?offset=20&limit=20",
            "previous": null,
            "results": [
                {"name": "canalave-city-area", "url": "https://pokeapi.co/api/v2/location-area/1/"},
                {"name": "eterna-city-area", "url": "https://pokeapi.co/api/v2/location-area/2/"}
            ]
        }"#;

        let page: LocationPage = serde_json::from_str(json).expect("page should decode");

        assert_eq!(page.count, 1089);
        assert!(page.next.is_some());
        assert!(page.previous.is_none());
        assert_eq!(page.results.len(), 2);
        assert_eq!(page.results[0].name, "canalave-city-area");
    }

    #[test]
    fn test_location_area_decodes_encounters_and_ignores_unknown_fields() {
        let json = r#"{
            "id": 1,
            "name": "canalave-city-area",
            "game_index": 1,
            "unused_field": {"anything": true},
            "location": {"name": "canalave-city", "url": "https://pokeapi.co/api/v2/location/1/"},
            "pokemon_encounters": [
                {
                    "pokemon": {"name": "tentacool", "url": "https://pokeapi.co/api/v2/pokemon/72/"},
                    "version_details": [
                        {
                            "version": {"name": "diamond", "url": "https://pokeapi.co/api/v2/version/12/"},
                            "max_chance": 60,
                            "encounter_details": [
                                {
                                    "min_level": 20,
                                    "max_level": 30,
                                    "condition_values": [],
                                    "chance": 60,
                                    "method": {"name": "surf", "url": "https://pokeapi.co/api/v2/encounter-method/5/"}
                                }
                            ]
                        }
                    ]
                },
                {
                    "pokemon": {"name": "tentacruel", "url": "https://pokeapi.co/api/v2/pokemon/73/"}
                }
            ]
        }"#;

        let area: LocationArea = serde_json::from_str(json).expect("area should decode");

        assert_eq!(area.name, "canalave-city-area");
        assert_eq!(area.pokemon_names().collect::<Vec<_>>(), ["tentacool", "tentacruel"]);
        assert_eq!(
            area.pokemon_encounters[0].version_details[0].encounter_details[0].method.name,
            "surf"
        );
        assert!(area.encounter_method_rates.is_empty());
    }

    #[test]
    fn test_pokemon_decodes_stats_and_types() {
        let json = r#"{
            "id": 25,
            "name": "pikachu",
            "base_experience": 112,
            "height": 4,
            "weight": 60,
            "is_default": true,
            "order": 35,
            "stats": [
                {"base_stat": 35, "effort": 0, "stat": {"name": "hp", "url": "https://pokeapi.co/api/v2/stat/1/"}}
            ],
            "types": [
                {"slot": 1, "type": {"name": "electric", "url": "https://pokeapi.co/api/v2/type/13/"}}
            ]
        }"#;

        let pokemon: Pokemon = serde_json::from_str(json).expect("pokemon should decode");

        assert_eq!(pokemon.base_experience, Some(112));
        assert_eq!(pokemon.stats[0].stat.name, "hp");
        assert_eq!(pokemon.stats[0].base_stat, 35);
        assert_eq!(pokemon.types[0].kind.name, "electric");
    }

    #[test]
    fn test_pokemon_with_null_base_experience() {
        let json = r#"{"name": "pikachu-rock-star", "base_experience": null}"#;
        let pokemon: Pokemon = serde_json::from_str(json).expect("pokemon should decode");
        assert!(pokemon.base_experience.is_none());
        assert!(pokemon.stats.is_empty());
    }

    #[test]
    fn test_location_page_missing_results_is_an_error_free_default() {
        let page: LocationPage =
            serde_json::from_str(r#"{"next": null, "previous": null}"#).expect("should decode");
        assert!(page.results.is_empty());
    }
}
