// src/fallback.rs
//
// Deterministic, locally computed substitutes used whenever the Gemini
// pipeline cannot produce a valid answer. The user-visible contract for the
// AI endpoints is "always a plausible answer", never a bare error.

use crate::models::{
    ChampionsData, CoachReply, CounterSuggestion, ItemBuild, MetaHeroEntry, MetaHeroList, Tier,
};
use crate::prompts::arabic_month_year;
use chrono::Utc;

/// Which failure produced the coach apology. Each maps to a distinct fixed
/// Arabic string so the UI can stay conversational.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApologyReason {
    EmptyResponse,
    ParseFailure,
    ConnectionFailure,
}

/// Deterministic counter pick used when the upstream call exhausts retries
/// or returns an invalid shape.
///
/// Selection order: first catalog-order hero whose lane matches the request
/// and who is not among the enemies, else the first non-enemy hero, else the
/// first hero in the catalog. Catalog order is the tie-break within each
/// tier.
pub fn counter_fallback(
    catalog: &ChampionsData,
    enemy_ids: &[String],
    preferred_lane: &str,
) -> CounterSuggestion {
    let heroes = &catalog.heroes;
    let hero = heroes
        .iter()
        .find(|h| h.lane.eq_ignore_ascii_case(preferred_lane) && !enemy_ids.contains(&h.id))
        .or_else(|| heroes.iter().find(|h| !enemy_ids.contains(&h.id)))
        .or_else(|| heroes.first());

    // The catalog is validated non-empty at startup; an empty suggestion is
    // only reachable from tests constructing a bare catalog.
    let (hero_id, hero_name, hero_name_ar) = match hero {
        Some(h) => (h.id.clone(), h.name.clone(), h.name_ar.clone()),
        None => (String::new(), String::new(), String::new()),
    };

    CounterSuggestion {
        hero_id,
        hero_name,
        hero_name_ar,
        reason: "هذا البطل مناسب للممر المختار ويمكنه التعامل مع تشكيلة العدو بشكل جيد. يتميز بقدرات قوية تساعده على الصمود والتفوق في المواجهات.".to_string(),
        combat_tips: vec![
            "حافظ على مسافة آمنة في بداية اللعبة وركز على جمع الذهب".to_string(),
            "استخدم مهاراتك بحكمة ولا تهدرها في مواقف غير ضرورية".to_string(),
            "تعاون مع فريقك في المعارك الجماعية وركز على الأهداف".to_string(),
        ],
        build: ItemBuild {
            items: vec![
                "Tough Boots".to_string(),
                "Blade of Despair".to_string(),
                "Endless Battle".to_string(),
                "Brute Force".to_string(),
                "Athena's Shield".to_string(),
                "Immortality".to_string(),
            ],
            emblem: "شعار المقاتل".to_string(),
            emblem_talent: "Festival of Blood".to_string(),
            skill_order: "1-2-1-3-1-2-1-2-3-2-1-2-3".to_string(),
        },
        game_phase_tips: None,
        tricks: None,
    }
}

/// Hand-authored 15-hero tier list (5 S / 5 A / 5 B) served verbatim when
/// meta generation or parsing fails.
pub fn default_meta_heroes(season: &str) -> MetaHeroList {
    let entry = |hero_id: &str, tier: Tier, reason: &str| MetaHeroEntry {
        hero_id: hero_id.to_string(),
        tier,
        reason: reason.to_string(),
    };

    MetaHeroList {
        heroes: vec![
            entry("ling", Tier::S, "قدرة عالية على التنقل والقتل السريع"),
            entry("fanny", Tier::S, "أقوى جانجلر في اللعبة"),
            entry("wanwan", Tier::S, "ضرر عالي ومناعة من الكراود كنترول"),
            entry("valentina", Tier::S, "قدرة على نسخ ألتميت أي بطل"),
            entry("khufra", Tier::S, "أفضل تانك للكاونتر"),
            entry("beatrix", Tier::A, "تنوع كبير في أسلوب اللعب"),
            entry("lancelot", Tier::A, "قدرة عالية على الهروب والقتل"),
            entry("kagura", Tier::A, "ضرر عالي وتحكم ممتاز"),
            entry("chou", Tier::A, "تنوع في الأدوار والكومبو القوي"),
            entry("franco", Tier::A, "هوك قوي يغير مجرى المعركة"),
            entry("esmeralda", Tier::B, "درع قوي وضرر مستمر"),
            entry("yu_zhong", Tier::B, "تحمل عالي وضرر ممتاز"),
            entry("mathilda", Tier::B, "دعم ممتاز مع حركة سريعة"),
            entry("xavier", Tier::B, "ضرر عالي من مسافة بعيدة"),
            entry("julian", Tier::B, "مرونة عالية في المهارات"),
        ],
        last_updated: arabic_month_year(Utc::now()),
        season: season.to_string(),
    }
}

/// Fixed apology replies for the coach endpoint. No hero inference is
/// attempted locally.
pub fn coach_apology(reason: ApologyReason) -> CoachReply {
    let response = match reason {
        ApologyReason::EmptyResponse => {
            "عذراً، لم أتمكن من معالجة سؤالك. يرجى المحاولة مرة أخرى."
        }
        ApologyReason::ParseFailure => {
            "عذراً، حدث خطأ في معالجة الرد. يرجى المحاولة مرة أخرى."
        }
        ApologyReason::ConnectionFailure => {
            "عذراً، حدث خطأ في الاتصال. يرجى المحاولة مرة أخرى."
        }
    };
    CoachReply {
        response: response.to_string(),
        hero_mentioned: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Hero;

    fn hero(id: &str, lane: &str) -> Hero {
        Hero {
            id: id.to_string(),
            name: id.to_uppercase(),
            name_ar: format!("{id}-ar"),
            role: "Fighter".to_string(),
            role_ar: "مقاتل".to_string(),
            lane: lane.to_string(),
            lane_ar: "ممر".to_string(),
            image: String::new(),
        }
    }

    fn catalog(heroes: Vec<Hero>) -> ChampionsData {
        ChampionsData {
            heroes,
            lanes: vec![],
            roles: vec![],
        }
    }

    #[test]
    fn prefers_lane_match_that_is_not_an_enemy() {
        let data = catalog(vec![
            hero("enemy_mid", "mid"),
            hero("other_lane", "gold"),
            hero("good_mid", "mid"),
        ]);
        let suggestion = counter_fallback(&data, &["enemy_mid".to_string()], "mid");
        assert_eq!(suggestion.hero_id, "good_mid");
    }

    #[test]
    fn falls_back_to_any_non_enemy_when_lane_has_none() {
        let data = catalog(vec![hero("a", "gold"), hero("b", "exp")]);
        let suggestion = counter_fallback(&data, &["a".to_string()], "mid");
        assert_eq!(suggestion.hero_id, "b");
    }

    #[test]
    fn falls_back_to_first_hero_when_all_are_enemies() {
        let data = catalog(vec![hero("a", "gold"), hero("b", "exp")]);
        let suggestion = counter_fallback(&data, &["a".to_string(), "b".to_string()], "mid");
        assert_eq!(suggestion.hero_id, "a");
    }

    #[test]
    fn lane_ties_break_by_catalog_order() {
        let data = catalog(vec![hero("first_mid", "mid"), hero("second_mid", "mid")]);
        let suggestion = counter_fallback(&data, &[], "mid");
        assert_eq!(suggestion.hero_id, "first_mid");
    }

    #[test]
    fn fallback_build_is_complete() {
        let data = catalog(vec![hero("a", "mid")]);
        let suggestion = counter_fallback(&data, &[], "mid");
        assert_eq!(suggestion.build.items.len(), 6);
        assert!(suggestion.build.items.iter().all(|i| !i.is_empty()));
        assert!(!suggestion.reason.is_empty());
        assert_eq!(suggestion.combat_tips.len(), 3);
    }

    #[test]
    fn default_meta_list_has_five_per_tier() {
        let list = default_meta_heroes("Season 38");
        assert_eq!(list.heroes.len(), 15);
        for tier in [Tier::S, Tier::A, Tier::B] {
            assert_eq!(list.heroes.iter().filter(|h| h.tier == tier).count(), 5);
        }
        assert_eq!(list.season, "Season 38");
        assert!(!list.last_updated.is_empty());
    }

    #[test]
    fn apologies_are_distinct_and_non_empty() {
        let replies = [
            coach_apology(ApologyReason::EmptyResponse),
            coach_apology(ApologyReason::ParseFailure),
            coach_apology(ApologyReason::ConnectionFailure),
        ];
        for reply in &replies {
            assert!(!reply.response.is_empty());
            assert!(reply.hero_mentioned.is_none());
        }
        assert_ne!(replies[0].response, replies[1].response);
        assert_ne!(replies[1].response, replies[2].response);
    }
}
