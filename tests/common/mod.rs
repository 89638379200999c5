// tests/common/mod.rs

use axum_test::TestServer;
use mlbb_coach_server::config::AppConfig;
use mlbb_coach_server::{create_router, AppState};
use serde_json::{json, Value};
use std::sync::Arc;

/// Test configuration pointing the Gemini client at a mock server.
pub fn test_config(base_url: &str, keys: &[&str]) -> AppConfig {
    let mut config = AppConfig::default();
    config.gemini.base_url = base_url.to_string();
    config.gemini.api_keys = keys.iter().map(|k| k.to_string()).collect();
    config.catalog_path = "data/champions.json".to_string();
    config
}

pub fn test_server(config: AppConfig) -> TestServer {
    let state = Arc::new(AppState::new(config).expect("failed to build test AppState"));
    TestServer::new(create_router(state)).expect("failed to start test server")
}

/// Wraps `text` in the Gemini `generateContent` success envelope.
pub fn gemini_text_response(text: &str) -> Value {
    json!({
        "candidates": [
            {
                "content": {
                    "parts": [{ "text": text }],
                    "role": "model"
                },
                "finishReason": "STOP"
            }
        ]
    })
}

pub fn valid_counter_json() -> String {
    json!({
        "heroId": "chou",
        "heroName": "Chou",
        "heroNameAr": "تشو",
        "reason": "كاونتر ممتاز ضد تشكيلة العدو",
        "combatTips": ["نصيحة أولى", "نصيحة ثانية", "نصيحة ثالثة"],
        "build": {
            "items": ["Warrior Boots", "Blade of Despair", "Endless Battle", "Brute Force", "Athena's Shield", "Immortality"],
            "emblem": "شعار المقاتل",
            "emblemTalent": "Festival of Blood",
            "skillOrder": "1-2-1-3-1"
        }
    })
    .to_string()
}

/// A structurally valid 15-hero tier list using ids from the test catalog.
pub fn valid_meta_json() -> String {
    let ids_and_tiers = [
        ("ling", "S"),
        ("fanny", "S"),
        ("wanwan", "S"),
        ("valentina", "S"),
        ("khufra", "S"),
        ("beatrix", "A"),
        ("lancelot", "A"),
        ("kagura", "A"),
        ("chou", "A"),
        ("franco", "A"),
        ("esmeralda", "B"),
        ("yu_zhong", "B"),
        ("mathilda", "B"),
        ("xavier", "B"),
        ("julian", "B"),
    ];
    let heroes: Vec<Value> = ids_and_tiers
        .iter()
        .map(|(id, tier)| json!({ "heroId": id, "tier": tier, "reason": "قوي في الميتا" }))
        .collect();
    json!({
        "heroes": heroes,
        "lastUpdated": "أغسطس 2026",
        "season": "Season 38"
    })
    .to_string()
}
