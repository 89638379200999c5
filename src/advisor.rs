// src/advisor.rs
//
// The AI pipeline behind the three advice endpoints: build a prompt, run it
// through the retry executor, gate the reply on shape, and fall back to a
// local answer on any failure. Nothing in here ever surfaces a pipeline
// error to the caller.

use crate::error::{AppError, Result};
use crate::executor::RetryExecutor;
use crate::fallback::{self, ApologyReason};
use crate::models::{ChampionsData, CoachMessage, CoachReply, CounterSuggestion, MetaHeroList};
use crate::prompts;
use chrono::Utc;
use serde::Deserialize;
use tracing::warn;

pub struct Advisor {
    executor: RetryExecutor,
    season: String,
}

impl Advisor {
    pub fn new(executor: RetryExecutor, season: String) -> Self {
        Self { executor, season }
    }

    /// Counter-pick suggestion for the given enemies and lane. Never fails:
    /// retry exhaustion, empty text, and malformed JSON all route to the
    /// deterministic fallback pick.
    pub async fn counter_suggestion(
        &self,
        catalog: &ChampionsData,
        enemy_ids: &[String],
        preferred_lane: &str,
    ) -> CounterSuggestion {
        let prompt = prompts::counter_prompt(catalog, enemy_ids, preferred_lane);
        match self.executor.generate(&prompt).await {
            Ok(text) => match parse_counter(&text) {
                Ok(suggestion) => suggestion,
                Err(e) => {
                    warn!(error = %e, "Counter response failed shape validation, using fallback");
                    fallback::counter_fallback(catalog, enemy_ids, preferred_lane)
                }
            },
            Err(e) => {
                warn!(error = %e, "Counter generation failed, using fallback");
                fallback::counter_fallback(catalog, enemy_ids, preferred_lane)
            }
        }
    }

    /// Current meta tier list. Never fails: any pipeline problem yields the
    /// hand-authored default list.
    pub async fn meta_heroes(&self, catalog: &ChampionsData) -> MetaHeroList {
        let last_updated = prompts::arabic_month_year(Utc::now());
        let prompt = prompts::meta_prompt(catalog, &last_updated, &self.season);
        match self.executor.generate(&prompt).await {
            Ok(text) => match parse_meta(&text, &last_updated, &self.season) {
                Ok(list) => list,
                Err(e) => {
                    warn!(error = %e, "Meta response failed shape validation, using default list");
                    fallback::default_meta_heroes(&self.season)
                }
            },
            Err(e) => {
                warn!(error = %e, "Meta generation failed, using default list");
                fallback::default_meta_heroes(&self.season)
            }
        }
    }

    /// Coaching reply for a free-form question. Never fails: each failure
    /// mode maps to its own fixed apology.
    pub async fn coach_reply(&self, question: &str, history: &[CoachMessage]) -> CoachReply {
        let prompt = prompts::coach_prompt(question, history);
        match self.executor.generate(&prompt).await {
            Ok(text) => parse_coach(&text),
            Err(e) => {
                warn!(error = %e, "Coach generation failed, using apology");
                fallback::coach_apology(ApologyReason::ConnectionFailure)
            }
        }
    }
}

/// Shape gate for counter suggestions: non-empty text that deserializes with
/// all six required fields (`heroId`, `heroName`, `heroNameAr`, `reason`,
/// `combatTips`, `build`).
fn parse_counter(text: &str) -> Result<CounterSuggestion> {
    if text.trim().is_empty() {
        return Err(AppError::shape_invalid("empty response text"));
    }
    serde_json::from_str(text)
        .map_err(|e| AppError::shape_invalid(format!("counter suggestion: {e}")))
}

#[derive(Deserialize)]
struct RawMetaList {
    heroes: Vec<crate::models::MetaHeroEntry>,
    #[serde(rename = "lastUpdated")]
    #[serde(default)]
    last_updated: String,
    #[serde(default)]
    season: String,
}

/// Shape gate for the meta list: non-empty text with at least one hero
/// entry. `lastUpdated` and `season` are cosmetic; when the model omits
/// them they are stamped locally instead of discarding the list.
fn parse_meta(text: &str, stamp: &str, season: &str) -> Result<MetaHeroList> {
    if text.trim().is_empty() {
        return Err(AppError::shape_invalid("empty response text"));
    }
    let raw: RawMetaList = serde_json::from_str(text)
        .map_err(|e| AppError::shape_invalid(format!("meta heroes: {e}")))?;
    if raw.heroes.is_empty() {
        return Err(AppError::shape_invalid("meta heroes list is empty"));
    }
    Ok(MetaHeroList {
        heroes: raw.heroes,
        last_updated: if raw.last_updated.is_empty() {
            stamp.to_string()
        } else {
            raw.last_updated
        },
        season: if raw.season.is_empty() {
            season.to_string()
        } else {
            raw.season
        },
    })
}

#[derive(Deserialize, Default)]
struct RawCoachReply {
    #[serde(default)]
    response: Option<String>,
    #[serde(rename = "heroMentioned")]
    #[serde(default)]
    hero_mentioned: Option<String>,
}

/// Coach replies degrade per failure mode instead of erroring: empty text
/// and unparsable JSON each get their own apology, and a parsed object with
/// a blank `response` gets the empty-response apology.
fn parse_coach(text: &str) -> CoachReply {
    if text.trim().is_empty() {
        return fallback::coach_apology(ApologyReason::EmptyResponse);
    }
    match serde_json::from_str::<RawCoachReply>(text) {
        Ok(raw) => {
            let response = raw.response.unwrap_or_default();
            if response.is_empty() {
                return fallback::coach_apology(ApologyReason::EmptyResponse);
            }
            CoachReply {
                response,
                hero_mentioned: raw.hero_mentioned.filter(|h| !h.is_empty() && h != "null"),
            }
        }
        Err(e) => {
            warn!(error = %e, "Coach response was not valid JSON, using apology");
            fallback::coach_apology(ApologyReason::ParseFailure)
        }
    }
}
