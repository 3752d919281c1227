//! Traveler profile used to personalise itinerary prompts.

// Author: kelexine (https://github.com/kelexine)

use serde::{Deserialize, Serialize};

/// Preferences describing who is travelling and how.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelerProfile {
    /// Trip length in days.
    #[serde(default)]
    pub duration_days: Option<u32>,
    /// Free-form budget description (e.g. "moderate", "under 2000 EUR").
    #[serde(default)]
    pub budget: Option<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    /// Pace or style of travel (e.g. "relaxed", "adventurous").
    #[serde(default)]
    pub travel_style: Option<String>,
    #[serde(default)]
    pub group_size: Option<u32>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl TravelerProfile {
    /// True when the profile carries nothing a prompt could use.
    pub fn is_empty(&self) -> bool {
        self.duration_days.is_none()
            && blank(&self.budget)
            && self.interests.iter().all(|i| i.trim().is_empty())
            && blank(&self.travel_style)
            && self.group_size.is_none()
            && blank(&self.notes)
    }

    /// One line per known attribute, for inclusion in prompt text.
    pub fn summary(&self) -> String {
        let mut lines = Vec::new();
        if let Some(days) = self.duration_days {
            lines.push(format!("- Trip length: {} day(s)", days));
        }
        if let Some(budget) = self.budget.as_deref().filter(|b| !b.trim().is_empty()) {
            lines.push(format!("- Budget: {}", budget.trim()));
        }
        let interests: Vec<&str> = self
            .interests
            .iter()
            .map(|i| i.trim())
            .filter(|i| !i.is_empty())
            .collect();
        if !interests.is_empty() {
            lines.push(format!("- Interests: {}", interests.join(", ")));
        }
        if let Some(style) = self.travel_style.as_deref().filter(|s| !s.trim().is_empty()) {
            lines.push(format!("- Travel style: {}", style.trim()));
        }
        if let Some(size) = self.group_size {
            lines.push(format!("- Group size: {}", size));
        }
        if let Some(notes) = self.notes.as_deref().filter(|n| !n.trim().is_empty()) {
            lines.push(format!("- Additional notes: {}", notes.trim()));
        }
        lines.join("\n")
    }
}

fn blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}
