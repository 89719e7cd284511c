//! Remote payload shapes and their mapping into catalog types
//!
//! Only the fields the catalog uses are declared; serde ignores the rest.
//! Missing optional data falls back to documented placeholders instead of
//! failing the whole record.

use crate::catalog::{
    Ability, AbilityRef, CatalogRecord, NO_DESCRIPTION, RecordSummary, Stat, default_sprite_url,
};
use serde::Deserialize;

/// Language code of the description we show
const ENGLISH: &str = "en";

#[derive(Debug, Deserialize)]
pub(crate) struct IndexPayload {
    #[serde(default)]
    pub results: Vec<NamedResource>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct NamedResource {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RecordPayload {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub sprites: SpritesPayload,
    #[serde(default)]
    pub types: Vec<TypeSlot>,
    #[serde(default)]
    pub stats: Vec<StatPayload>,
    #[serde(default)]
    pub abilities: Vec<AbilitySlot>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SpritesPayload {
    pub front_default: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TypeSlot {
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatPayload {
    pub base_stat: u32,
    pub stat: NamedResource,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AbilitySlot {
    pub ability: NamedResource,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AbilityPayload {
    pub name: String,
    #[serde(default)]
    pub effect_entries: Vec<EffectEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EffectEntry {
    pub effect: String,
    pub language: NamedResource,
}

impl From<IndexPayload> for Vec<RecordSummary> {
    fn from(index: IndexPayload) -> Self {
        index
            .results
            .into_iter()
            .map(|entry| RecordSummary {
                name: entry.name,
                detail_url: entry.url,
            })
            .collect()
    }
}

impl RecordPayload {
    /// Record part of the payload
    pub fn to_record(&self) -> CatalogRecord {
        let sprite_url = self
            .sprites
            .front_default
            .clone()
            .unwrap_or_else(|| default_sprite_url(self.id));

        CatalogRecord {
            id: self.id,
            name: self.name.clone(),
            sprite_url,
            categories: self.types.iter().map(|slot| slot.kind.name.clone()).collect(),
        }
    }

    /// Base stats, saturated into `0..=255`
    pub fn to_stats(&self) -> Vec<Stat> {
        self.stats
            .iter()
            .map(|s| Stat {
                stat_name: s.stat.name.clone(),
                value: u8::try_from(s.base_stat).unwrap_or(u8::MAX),
            })
            .collect()
    }

    /// Unresolved ability references
    pub fn to_ability_refs(&self) -> Vec<AbilityRef> {
        self.abilities
            .iter()
            .map(|slot| AbilityRef {
                name: slot.ability.name.clone(),
                url: slot.ability.url.clone(),
            })
            .collect()
    }
}

impl From<AbilityPayload> for Ability {
    fn from(payload: AbilityPayload) -> Self {
        let description = payload
            .effect_entries
            .into_iter()
            .find(|entry| entry.language.name == ENGLISH)
            .map_or_else(|| NO_DESCRIPTION.to_string(), |entry| entry.effect);

        Self {
            name: payload.name,
            description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PIKACHU: &str = r#"{
        "id": 25,
        "name": "pikachu",
        "base_experience": 112,
        "sprites": { "front_default": "https://img.test/25.png", "back_default": null },
        "types": [ { "slot": 1, "type": { "name": "electric", "url": "https://api.test/type/13/" } } ],
        "stats": [
            { "base_stat": 35, "effort": 0, "stat": { "name": "hp", "url": "" } },
            { "base_stat": 300, "effort": 0, "stat": { "name": "attack", "url": "" } }
        ],
        "abilities": [
            { "ability": { "name": "static", "url": "https://api.test/ability/9/" }, "is_hidden": false, "slot": 1 }
        ]
    }"#;

    #[test]
    fn test_record_mapping_ignores_extra_fields() {
        let payload: RecordPayload = serde_json::from_str(PIKACHU).unwrap();
        let record = payload.to_record();
        assert_eq!(record.id, 25);
        assert_eq!(record.name, "pikachu");
        assert_eq!(record.sprite_url, "https://img.test/25.png");
        assert_eq!(record.categories, vec!["electric"]);
    }

    #[test]
    fn test_stats_saturate() {
        let payload: RecordPayload = serde_json::from_str(PIKACHU).unwrap();
        let stats = payload.to_stats();
        assert_eq!(stats[0], Stat { stat_name: "hp".into(), value: 35 });
        assert_eq!(stats[1].value, 255);
    }

    #[test]
    fn test_ability_refs() {
        let payload: RecordPayload = serde_json::from_str(PIKACHU).unwrap();
        let refs = payload.to_ability_refs();
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].name, "static");
        assert_eq!(refs[0].url, "https://api.test/ability/9/");
    }

    #[test]
    fn test_missing_sprite_uses_default() {
        let payload: RecordPayload =
            serde_json::from_str(r#"{ "id": 132, "name": "ditto", "sprites": { "front_default": null } }"#)
                .unwrap();
        assert_eq!(payload.to_record().sprite_url, default_sprite_url(132));
        assert!(payload.to_record().categories.is_empty());
    }

    #[test]
    fn test_missing_id_is_an_error() {
        let result: Result<RecordPayload, _> = serde_json::from_str(r#"{ "name": "nobody" }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_ability_prefers_english() {
        let payload: AbilityPayload = serde_json::from_str(
            r#"{
                "name": "static",
                "effect_entries": [
                    { "effect": "Kann paralysieren.", "language": { "name": "de", "url": "" } },
                    { "effect": "May paralyze on contact.", "language": { "name": "en", "url": "" } }
                ]
            }"#,
        )
        .unwrap();
        let ability = Ability::from(payload);
        assert_eq!(ability.description, "May paralyze on contact.");
    }

    #[test]
    fn test_ability_without_english_uses_placeholder() {
        let payload: AbilityPayload = serde_json::from_str(
            r#"{ "name": "mystery", "effect_entries": [ { "effect": "Inconnu.", "language": { "name": "fr" } } ] }"#,
        )
        .unwrap();
        assert_eq!(Ability::from(payload).description, NO_DESCRIPTION);
    }

    #[test]
    fn test_index_mapping() {
        let index: IndexPayload = serde_json::from_str(
            r#"{ "count": 2, "next": null, "results": [
                { "name": "bulbasaur", "url": "https://api.test/pokemon/1/" },
                { "name": "ivysaur", "url": "https://api.test/pokemon/2/" }
            ] }"#,
        )
        .unwrap();
        let summaries: Vec<RecordSummary> = index.into();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[1].name, "ivysaur");
        assert_eq!(summaries[1].detail_url, "https://api.test/pokemon/2/");
    }
}
