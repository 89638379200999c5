// src/models.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

/// A single hero entry from the static catalog (`data/champions.json`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Hero {
    pub id: String,
    pub name: String,
    pub name_ar: String,
    pub role: String,
    pub role_ar: String,
    pub lane: String,
    pub lane_ar: String,
    #[serde(default)]
    pub image: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LaneInfo {
    pub id: String,
    pub name: String,
    pub name_ar: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RoleInfo {
    pub id: String,
    pub name: String,
    pub name_ar: String,
}

/// The full static catalog served by `GET /api/heroes`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChampionsData {
    pub heroes: Vec<Hero>,
    pub lanes: Vec<LaneInfo>,
    pub roles: Vec<RoleInfo>,
}

impl ChampionsData {
    pub fn hero_by_id(&self, id: &str) -> Option<&Hero> {
        self.heroes.iter().find(|h| h.id == id)
    }
}

/// Body of `POST /api/counter`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CounterRequest {
    #[validate(length(min = 1, max = 5, message = "enemyHeroes must contain 1 to 5 entries"))]
    pub enemy_heroes: Vec<String>,
    #[validate(length(min = 1, message = "preferredLane must not be empty"))]
    pub preferred_lane: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ItemBuild {
    pub items: Vec<String>,
    pub emblem: String,
    pub emblem_talent: String,
    pub skill_order: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EarlyGameTips {
    pub timing: String,
    pub strategy: String,
    pub farm_tips: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MidGameTips {
    pub timing: String,
    pub strategy: String,
    pub team_fight_timing: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LateGameTips {
    pub timing: String,
    pub strategy: String,
    pub objective_priority: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GamePhaseTips {
    pub early_game: EarlyGameTips,
    pub mid_game: MidGameTips,
    pub late_game: LateGameTips,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Trick {
    pub name: String,
    pub description: String,
}

/// The counter-pick answer returned by `POST /api/counter`.
///
/// `heroId` through `build` are mandatory; a model response missing any of
/// them fails deserialization and is replaced by the local fallback.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CounterSuggestion {
    pub hero_id: String,
    pub hero_name: String,
    pub hero_name_ar: String,
    pub reason: String,
    pub combat_tips: Vec<String>,
    pub build: ItemBuild,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_phase_tips: Option<GamePhaseTips>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tricks: Option<Vec<Trick>>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Tier {
    S,
    A,
    B,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MetaHeroEntry {
    pub hero_id: String,
    pub tier: Tier,
    pub reason: String,
}

/// The tier list returned by `GET /api/meta-heroes`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MetaHeroList {
    pub heroes: Vec<MetaHeroEntry>,
    pub last_updated: String,
    pub season: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CoachRole {
    User,
    Coach,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoachMessage {
    pub role: CoachRole,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero_mentioned: Option<String>,
}

/// Body of `POST /api/coach`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CoachRequest {
    #[validate(length(min = 1, message = "question must not be empty"))]
    pub question: String,
    #[serde(default)]
    pub conversation_history: Vec<CoachMessage>,
    #[serde(default)]
    pub user_hero: Option<String>,
    #[serde(default)]
    pub enemy_heroes: Option<Vec<String>>,
}

/// Answer returned by `POST /api/coach`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CoachReply {
    pub response: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero_mentioned: Option<String>,
}
