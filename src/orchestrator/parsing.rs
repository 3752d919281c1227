// Best-effort parsing of backend text into structured results
// Author: kelexine (https://github.com/kelexine)
//
// Every entry point here is infallible: when no structured reading works,
// the raw text comes back with an explicit marker instead of an error.

use crate::models::{DayPlan, InsightsResult, ItineraryResult, TranslationResult};
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;
use tracing::debug;

type StructuredParser = fn(&str) -> Option<Value>;

/// Insights parsers, tried in order.
const INSIGHTS_PARSERS: [StructuredParser; 3] = [parse_json_document, parse_fenced_block, parse_labelled_json];

fn fenced_block_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)```[A-Za-z0-9_-]*\s*(.*?)```").expect("valid fence regex"))
}

fn type_label_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^\s*json\s*:?\s*").expect("valid label regex"))
}

fn paragraph_break_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n[ \t]*\r?\n").expect("valid paragraph regex"))
}

fn day_heading_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?mi)^##[ \t]*(day\b[^\n]*)$").expect("valid day regex"))
}

fn subsection_heading_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^###[ \t]*([^\n]+)$").expect("valid subsection regex"))
}

fn translation_marker_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?mi)^[ \t]*(?:\*\*)?(notes|cultural adaptations)(?:\*\*)?[ \t]*:(?:\*\*)?")
            .expect("valid marker regex")
    })
}

/// Parse JSON, accepting only objects and arrays as structured data.
fn parse_structured(text: &str) -> Option<Value> {
    match serde_json::from_str::<Value>(text.trim()) {
        Ok(value @ (Value::Object(_) | Value::Array(_))) => Some(value),
        _ => None,
    }
}

/// The whole reply is already a JSON document.
pub fn parse_json_document(raw: &str) -> Option<Value> {
    parse_structured(raw)
}

/// A fenced code block holding a JSON document.
pub fn parse_fenced_block(raw: &str) -> Option<Value> {
    fenced_block_regex()
        .captures_iter(raw)
        .find_map(|caps| caps.get(1).and_then(|body| parse_structured(body.as_str())))
}

/// Plain text with an optional leading `json` type label.
pub fn parse_labelled_json(raw: &str) -> Option<Value> {
    let stripped = type_label_regex().replace(raw, "");
    parse_structured(&stripped)
}

/// Non-empty, trimmed paragraphs of `raw`.
pub fn split_sections(raw: &str) -> Vec<String> {
    paragraph_break_regex()
        .split(raw)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn parse_insights(raw: &str) -> InsightsResult {
    if let Some(value) = INSIGHTS_PARSERS.iter().find_map(|parse| parse(raw)) {
        return InsightsResult::Structured(value);
    }

    debug!("Insights reply is not structured, falling back to sections");
    InsightsResult::Sections {
        sections: split_sections(raw),
        raw_text: raw.to_string(),
    }
}

/// Split Markdown into `## Day` sections and their `###` subsections.
pub fn parse_day_sections(raw: &str) -> Option<Vec<DayPlan>> {
    let headings: Vec<_> = day_heading_regex().captures_iter(raw).collect();
    if headings.is_empty() {
        return None;
    }

    let days = headings
        .iter()
        .enumerate()
        .map(|(i, caps)| {
            let whole = caps.get(0).map_or(0..0, |m| m.range());
            let body_end = headings
                .get(i + 1)
                .and_then(|next| next.get(0))
                .map_or(raw.len(), |m| m.start());
            let body = &raw[whole.end..body_end];

            DayPlan {
                day: caps.get(1).map_or("", |m| m.as_str()).trim().to_string(),
                sections: parse_subsections(body).into_iter().collect(),
            }
        })
        .collect();

    Some(days)
}

fn parse_subsections(body: &str) -> Vec<(String, String)> {
    let headings: Vec<_> = subsection_heading_regex().captures_iter(body).collect();

    headings
        .iter()
        .enumerate()
        .map(|(i, caps)| {
            let start = caps.get(0).map_or(0, |m| m.end());
            let end = headings
                .get(i + 1)
                .and_then(|next| next.get(0))
                .map_or(body.len(), |m| m.start());
            let name = caps
                .get(1)
                .map_or("", |m| m.as_str())
                .trim()
                .trim_end_matches(':')
                .trim()
                .to_lowercase();
            (name, body[start..end].trim().to_string())
        })
        .collect()
}

pub fn parse_itinerary(raw: &str) -> ItineraryResult {
    let trimmed = raw.trim();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return match serde_json::from_str::<Value>(trimmed) {
            Ok(value) => ItineraryResult::Structured(value),
            Err(e) => ItineraryResult::Unparsed {
                error: format!("Failed to parse itinerary JSON: {}", e),
                raw_text: raw.to_string(),
            },
        };
    }

    match parse_day_sections(raw) {
        Some(days) => ItineraryResult::Days(days),
        None => ItineraryResult::Unparsed {
            error: "No day sections found in itinerary".to_string(),
            raw_text: raw.to_string(),
        },
    }
}

/// Separate the translation from optional `Notes:` / `Cultural adaptations:` trailers.
pub fn parse_translation(raw: &str) -> TranslationResult {
    let markers: Vec<_> = translation_marker_regex().captures_iter(raw).collect();
    let Some(first) = markers.first().and_then(|caps| caps.get(0)) else {
        return TranslationResult::Text(strip_translation_label(raw).to_string());
    };

    let mut notes = None;
    let mut cultural_adaptations = None;
    for (i, caps) in markers.iter().enumerate() {
        let start = caps.get(0).map_or(0, |m| m.end());
        let end = markers
            .get(i + 1)
            .and_then(|next| next.get(0))
            .map_or(raw.len(), |m| m.start());
        let content = raw[start..end].trim().to_string();
        let label = caps.get(1).map_or(String::new(), |m| m.as_str().to_lowercase());

        if label == "notes" {
            notes = Some(content);
        } else {
            cultural_adaptations = Some(content);
        }
    }

    TranslationResult::Annotated {
        translation: strip_translation_label(&raw[..first.start()]).to_string(),
        notes,
        cultural_adaptations,
    }
}

fn strip_translation_label(text: &str) -> &str {
    let trimmed = text.trim();
    match trimmed.get(..12) {
        Some(label) if label.eq_ignore_ascii_case("translation:") => trimmed[12..].trim(),
        _ => trimmed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_json_document() {
        let result = parse_insights(r#"{"customs": "Bow when greeting"}"#);
        assert_eq!(
            result,
            InsightsResult::Structured(json!({"customs": "Bow when greeting"}))
        );
    }

    #[test]
    fn test_fenced_block_inline() {
        let raw = r#"```json {"historical_context": "Edo became Tokyo in 1868"} ```"#;
        assert_eq!(
            parse_fenced_block(raw),
            Some(json!({"historical_context": "Edo became Tokyo in 1868"}))
        );
    }

    #[test]
    fn test_fenced_block_with_surrounding_prose() {
        let raw = "Here you go:\n```json\n{\"cuisine\": \"Ramen\"}\n```\nEnjoy!";
        assert_eq!(parse_fenced_block(raw), Some(json!({"cuisine": "Ramen"})));
        assert_eq!(parse_json_document(raw), None);
    }

    #[test]
    fn test_labelled_json() {
        assert_eq!(
            parse_labelled_json("JSON: {\"etiquette\": \"Remove shoes\"}"),
            Some(json!({"etiquette": "Remove shoes"}))
        );
        assert_eq!(
            parse_labelled_json("json\n[1, 2]"),
            Some(json!([1, 2]))
        );
    }

    #[test]
    fn test_scalars_are_not_structured() {
        assert_eq!(parse_json_document("42"), None);
        assert_eq!(parse_json_document("\"text\""), None);
    }

    #[test]
    fn test_prose_falls_back_to_sections() {
        let raw = "First paragraph.\n\n  \n\nSecond paragraph.\n   \nThird.";
        match parse_insights(raw) {
            InsightsResult::Sections { sections, raw_text } => {
                assert_eq!(sections, vec!["First paragraph.", "Second paragraph.", "Third."]);
                assert_eq!(raw_text, raw);
            }
            other => panic!("expected sections, got {:?}", other),
        }
    }

    #[test]
    fn test_broken_fence_falls_back() {
        let raw = "```json\n{not json}\n```";
        assert!(matches!(parse_insights(raw), InsightsResult::Sections { .. }));
    }

    #[test]
    fn test_itinerary_days_and_subsections() {
        let raw = "Intro text\n\n## Day 1: Arrival\n### Morning\nLand at the airport.\n### Evening\nDinner in Shibuya.\n\n## Day 2\n### Morning\nTsukiji market.\n### Evening:\nKaraoke.";
        let ItineraryResult::Days(days) = parse_itinerary(raw) else {
            panic!("expected days");
        };

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].day, "Day 1: Arrival");
        assert_eq!(days[0].section("morning"), Some("Land at the airport."));
        assert_eq!(days[0].section("evening"), Some("Dinner in Shibuya."));
        assert_eq!(days[1].section("morning"), Some("Tsukiji market."));
        assert_eq!(days[1].section("evening"), Some("Karaoke."));
    }

    #[test]
    fn test_itinerary_subsection_headings_are_not_days() {
        let raw = "## Day 1\n### Day trip ideas\nNikko";
        let days = parse_day_sections(raw).unwrap();
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].section("day trip ideas"), Some("Nikko"));
    }

    #[test]
    fn test_itinerary_json() {
        assert_eq!(
            parse_itinerary("  [{\"day\": 1}]"),
            ItineraryResult::Structured(json!([{"day": 1}]))
        );
    }

    #[test]
    fn test_itinerary_broken_json_keeps_raw_text() {
        let raw = "{\"days\": [";
        match parse_itinerary(raw) {
            ItineraryResult::Unparsed { error, raw_text } => {
                assert!(error.contains("JSON"));
                assert_eq!(raw_text, raw);
            }
            other => panic!("expected unparsed, got {:?}", other),
        }
    }

    #[test]
    fn test_itinerary_without_days() {
        assert!(matches!(
            parse_itinerary("Just wander around."),
            ItineraryResult::Unparsed { .. }
        ));
    }

    #[test]
    fn test_plain_translation() {
        assert_eq!(
            parse_translation("  Bonjour  "),
            TranslationResult::Text("Bonjour".into())
        );
        assert_eq!(
            parse_translation("Translation: Bonjour"),
            TranslationResult::Text("Bonjour".into())
        );
    }

    #[test]
    fn test_annotated_translation() {
        let raw = "Bonjour tout le monde\n\nNotes: Informal greeting.\nCultural adaptations: none needed";
        assert_eq!(
            parse_translation(raw),
            TranslationResult::Annotated {
                translation: "Bonjour tout le monde".into(),
                notes: Some("Informal greeting.".into()),
                cultural_adaptations: Some("none needed".into()),
            }
        );
    }

    #[test]
    fn test_bold_notes_marker() {
        let raw = "Hola\n**Notes:** Neutral Spanish.";
        let result = parse_translation(raw);
        assert_eq!(result.translation(), "Hola");
        assert!(matches!(
            result,
            TranslationResult::Annotated { notes: Some(ref n), cultural_adaptations: None, .. } if n == "Neutral Spanish."
        ));
    }
}
