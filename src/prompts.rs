// src/prompts.rs
//
// Pure formatting of the Arabic prompts sent to Gemini. No retries, no
// branching logic. Each prompt embeds a strict JSON output-shape description
// and enumerates only the caller-relevant catalog entries to bound payload
// size.

use crate::models::{ChampionsData, CoachMessage, CoachRole, Hero};
use chrono::{DateTime, Datelike, Utc};

/// Counter prompts list at most this many candidate heroes.
const COUNTER_HERO_LIMIT: usize = 50;
/// Meta prompts list at most this many heroes.
const META_HERO_LIMIT: usize = 80;

const ARABIC_MONTHS: [&str; 12] = [
    "يناير",
    "فبراير",
    "مارس",
    "أبريل",
    "مايو",
    "يونيو",
    "يوليو",
    "أغسطس",
    "سبتمبر",
    "أكتوبر",
    "نوفمبر",
    "ديسمبر",
];

/// Arabic month name + year, e.g. "أغسطس 2026". Used to stamp meta tier lists.
pub fn arabic_month_year(now: DateTime<Utc>) -> String {
    let month = ARABIC_MONTHS[now.month0() as usize];
    format!("{} {}", month, now.year())
}

/// Bilingual display label for a lane id; unknown lanes pass through as-is.
pub fn lane_display_name(lane: &str) -> String {
    match lane {
        "gold" => "Gold Lane (خط الذهب)".to_string(),
        "exp" => "EXP Lane (خط الخبرة)".to_string(),
        "mid" => "Mid Lane (الخط الأوسط)".to_string(),
        "jungle" => "Jungle (الغابة)".to_string(),
        "roam" => "Roam (التجوال)".to_string(),
        other => other.to_string(),
    }
}

fn hero_line(hero: &Hero) -> String {
    format!(
        "{}: {} ({}) - {} - {}",
        hero.id, hero.name, hero.name_ar, hero.role, hero.lane
    )
}

fn enemy_names(catalog: &ChampionsData, enemy_ids: &[String]) -> String {
    enemy_ids
        .iter()
        .map(|id| match catalog.hero_by_id(id) {
            Some(hero) => format!("{} ({})", hero.name, hero.name_ar),
            None => id.clone(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn counter_prompt(catalog: &ChampionsData, enemy_ids: &[String], preferred_lane: &str) -> String {
    let enemy_hero_names = enemy_names(catalog, enemy_ids);
    let lane_name = lane_display_name(preferred_lane);

    let available_heroes = catalog
        .heroes
        .iter()
        .filter(|h| !enemy_ids.contains(&h.id))
        .take(COUNTER_HERO_LIMIT)
        .map(hero_line)
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"أنت خبير في لعبة Mobile Legends: Bang Bang. قدم اقتراحاً لأفضل بطل كاونتر مع نصائح متقدمة لكل مرحلة من اللعبة.

أبطال العدو: {enemy_hero_names}
الممر المفضل للاعب: {lane_name}

الأبطال المتاحة للاختيار:
{available_heroes}

قدم إجابتك بصيغة JSON التالية بالضبط (كل النصوص بالعربية):
{{
  "heroId": "معرف البطل من القائمة",
  "heroName": "اسم البطل بالإنجليزية",
  "heroNameAr": "اسم البطل بالعربية",
  "reason": "شرح مفصل لماذا هذا البطل هو أفضل كاونتر (3-4 جمل)",
  "combatTips": ["نصيحة قتالية 1", "نصيحة قتالية 2", "نصيحة قتالية 3"],
  "build": {{
    "items": ["عنصر 1", "عنصر 2", "عنصر 3", "عنصر 4", "عنصر 5", "عنصر 6"],
    "emblem": "اسم الشعار",
    "emblemTalent": "اسم الموهبة",
    "skillOrder": "ترتيب رفع المهارات مثل: 1-2-1-3-1"
  }},
  "gamePhaseTips": {{
    "earlyGame": {{
      "timing": "الدقيقة 0 إلى 5",
      "strategy": "استراتيجية البداية والفوكس على الفارم",
      "farmTips": ["نصيحة فارم 1", "نصيحة فارم 2", "كيف تسبق العدو في الجولد"]
    }},
    "midGame": {{
      "timing": "الدقيقة 5 إلى 12",
      "strategy": "متى تترك اللاين وتشارك في التيم فايت",
      "teamFightTiming": "متى يكون البطل قوي للمشاركة في التيم فايت (مثلا: بعد الحصول على البند الثاني أو عند المستوى 8)"
    }},
    "lateGame": {{
      "timing": "بعد الدقيقة 12",
      "strategy": "كيف تلعب في نهاية اللعبة وتحسم المباراة",
      "objectivePriority": ["الأهداف المهمة بالترتيب مثل: Lord, Turtle, Tower"]
    }}
  }},
  "tricks": [
    {{
      "name": "اسم الخدعة أو الكومبو",
      "description": "شرح كيفية تنفيذ الخدعة ضد أبطال العدو المختارين"
    }},
    {{
      "name": "خدعة ثانية",
      "description": "شرح آخر"
    }}
  ]
}}"#
    )
}

pub fn meta_prompt(catalog: &ChampionsData, last_updated: &str, season: &str) -> String {
    let hero_list = catalog
        .heroes
        .iter()
        .take(META_HERO_LIMIT)
        .map(hero_line)
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"أنت خبير في لعبة Mobile Legends: Bang Bang. قدم قائمة بأقوى 15 بطل في الميتا الحالية لسيزون {last_updated}.

الأبطال المتاحة:
{hero_list}

قدم إجابتك بصيغة JSON التالية:
{{
  "heroes": [
    {{"heroId": "معرف البطل", "tier": "S أو A أو B", "reason": "سبب قوته في الميتا الحالية"}},
    ...
  ],
  "lastUpdated": "{last_updated}",
  "season": "{season}"
}}

قواعد:
- اختر 15 بطل فقط من الأقوى
- 5 أبطال S-Tier (الأقوى)
- 5 أبطال A-Tier (قوي جداً)
- 5 أبطال B-Tier (قوي)
- استخدم heroId من القائمة بالضبط
- السبب يجب أن يكون جملة واحدة قصيرة بالعربية"#
    )
}

pub fn coach_prompt(question: &str, history: &[CoachMessage]) -> String {
    let history_text = history
        .iter()
        .map(|msg| {
            let speaker = match msg.role {
                CoachRole::User => "اللاعب",
                CoachRole::Coach => "المدرب",
            };
            format!("{}: {}", speaker, msg.content)
        })
        .collect::<Vec<_>>()
        .join("\n");

    let history_block = if history_text.is_empty() {
        String::new()
    } else {
        format!("المحادثة السابقة:\n{history_text}\n\n")
    };

    format!(
        r#"أنت مدرب خبير في لعبة Mobile Legends: Bang Bang. اسمك "المدرب الذكي".

قواعد مهمة جداً:
1. أجب دائماً بالعربية فقط - لا تستخدم الإنجليزية إطلاقاً
2. كن مختصراً جداً (جملة أو جملتين فقط) لأن الرد سيُقرأ صوتياً
3. قدم نصائح تكتيكية محددة وقابلة للتطبيق
4. إذا ذكر اللاعب بطلاً معيناً، اذكر اسمه بالعربية
5. كن ودوداً ومشجعاً
6. لا تستخدم أي كلمات إنجليزية حتى اسم اللعبة - استخدم "موبايل ليجند" بدلاً من "Mobile Legends"

{history_block}سؤال اللاعب: {question}

قدم إجابتك بصيغة JSON:
{{
  "response": "إجابتك هنا",
  "heroMentioned": "اسم البطل إذا تم ذكره أو null"
}}"#
    )
}
