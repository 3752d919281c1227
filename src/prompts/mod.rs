//! Prompt templates for the travel operations.
//!
//! Pure string builders; the orchestrator decides tuning and parses the
//! replies. The wording here fixes the output shapes the parsers expect:
//! a JSON object for insights, `## Day` / `###` headings for itineraries,
//! and a bare translation with an optional `Notes:` trailer.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use crate::models::TravelerProfile;

/// Keys requested from the backend for cultural insights.
pub const INSIGHT_KEYS: [&str; 5] = [
    "historical_context",
    "customs",
    "etiquette",
    "cuisine",
    "festivals",
];

pub fn build_insights_prompt(destination: &str) -> String {
    let keys = INSIGHT_KEYS
        .iter()
        .map(|k| format!("\"{}\"", k))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "You are a knowledgeable cultural guide. Describe the culture of {destination} \
         for a first-time visitor.\n\n\
         Respond with a single JSON object using exactly these keys: {keys}. \
         Each value should be a concise paragraph of practical, respectful advice. \
         Do not include any text outside the JSON object.",
        destination = destination.trim(),
        keys = keys,
    )
}

pub fn build_itinerary_prompt(destination: &str, profile: &TravelerProfile) -> String {
    let days = profile
        .duration_days
        .map(|d| format!("{}-day", d))
        .unwrap_or_else(|| "multi-day".to_string());

    format!(
        "You are an expert travel planner. Create a {days} itinerary for {destination}.\n\n\
         Traveler profile:\n{profile}\n\n\
         Format the plan in Markdown. Start every day with a heading of the form \
         `## Day N: <theme>` and split each day into `### Morning`, `### Afternoon` \
         and `### Evening` subsections. Mention specific places, approximate costs \
         and transport between stops.",
        days = days,
        destination = destination.trim(),
        profile = profile.summary(),
    )
}

pub fn build_translation_prompt(text: &str, source_lang: &str, target_lang: &str) -> String {
    format!(
        "Translate the following text from {source} to {target}. Preserve tone and \
         meaning, adapting idioms so they read naturally to a native speaker.\n\n\
         Reply with the translated text only. If something needed explanation, add a \
         line starting with `Notes:` after the translation; if you adapted cultural \
         references, add a line starting with `Cultural adaptations:`.\n\n\
         Text:\n{text}",
        source = source_lang.trim(),
        target = target_lang.trim(),
        text = text,
    )
}
