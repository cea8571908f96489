// src/extract.rs
//! Signal extractor: isolates the ingredient list from surrounding label text.
//!
//! OCR output carries marketing copy, weight annotations and punctuation noise
//! around the actual list. The extractor reduces all of that to a lower-cased,
//! comma-separated token string suitable for prompting.

use once_cell::sync::Lazy;
use regex::Regex;

/// Common list starts, checked in this order. The first marker that occurs
/// anywhere in the text wins, regardless of where the others appear.
const MARKERS: [&str; 3] = ["ingredients:", "contains:", "composition:"];

static RE_PERCENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+%").expect("percent regex"));
static RE_WEIGHT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(\d+.*?\)").expect("weight regex"));
static RE_NOISE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9,\s]").expect("noise regex"));
static RE_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace regex"));

/// Normalize raw OCR or user-supplied label text into an ingredient signal.
///
/// Always returns a string; empty input (or input that is all noise) yields
/// an empty string. Never errors.
pub fn extract_ingredients(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let mut clean = raw.to_lowercase();

    // Drop everything up to and including the winning marker.
    for marker in MARKERS {
        if let Some(pos) = clean.find(marker) {
            clean = clean[pos + marker.len()..].to_string();
            break;
        }
    }

    // Remove noise like percentages and weight annotations.
    let clean = RE_PERCENT.replace_all(&clean, "");
    let clean = RE_WEIGHT.replace_all(&clean, "");
    let clean = RE_NOISE.replace_all(&clean, "");
    let clean = RE_WS.replace_all(&clean, " ");
    clean.trim().to_string()
}
