// tests/contract.rs
//
// Contract validator: field-path diagnostics, strict-numeric
// confidence_score, and idempotent round-trip of well-formed results.

use food_label_analyzer::contract::validate;
use serde_json::json;

fn well_formed() -> serde_json::Value {
    json!({
        "verdict": "Moderately Processed",
        "reasoning": "Mostly whole ingredients with added sweeteners.",
        "tradeoffs": [
            {
                "benefit": "Contains whole grain oats",
                "concern": "Added sugar raises the glycemic load"
            }
        ],
        "sugar_info": {
            "level": "Medium",
            "explanation": "Sugar is the second listed ingredient."
        },
        "suitability": {
            "best_for": ["active adults"],
            "caution_for": ["people limiting added sugar"]
        },
        "confidence_score": 0.9,
        "uncertainty": "Serving size not visible on the label."
    })
}

#[test]
fn well_formed_result_round_trips_unchanged() {
    let candidate = well_formed();
    let first = validate(&candidate).expect("well-formed result must validate");

    let reserialized = serde_json::to_value(&first).expect("serialize result");
    assert_eq!(reserialized, candidate, "validation must not alter the value");

    let second = validate(&reserialized).expect("validated output must re-validate");
    assert_eq!(first, second, "validation must be idempotent");
}

#[test]
fn missing_tradeoff_concern_names_the_field_path() {
    let mut candidate = well_formed();
    candidate["tradeoffs"][0]
        .as_object_mut()
        .unwrap()
        .remove("concern");

    let err = validate(&candidate).unwrap_err();
    assert_eq!(err.path, "tradeoffs[0].concern");
    assert_eq!(err.expected, "string");
    assert_eq!(err.found, "missing");
}

#[test]
fn non_object_tradeoff_entry_is_rejected() {
    let mut candidate = well_formed();
    candidate["tradeoffs"] = json!([{"benefit": "b", "concern": "c"}, "cheap"]);

    let err = validate(&candidate).unwrap_err();
    assert_eq!(err.path, "tradeoffs[1]");
    assert_eq!(err.expected, "object");
    assert_eq!(err.found, "string");
}

#[test]
fn non_array_tradeoffs_is_rejected() {
    let mut candidate = well_formed();
    candidate["tradeoffs"] = json!("none");

    let err = validate(&candidate).unwrap_err();
    assert_eq!(err.path, "tradeoffs");
    assert_eq!(err.expected, "array");
}

#[test]
fn string_confidence_score_is_rejected() {
    let mut candidate = well_formed();
    candidate["confidence_score"] = json!("0.9");

    let err = validate(&candidate).unwrap_err();
    assert_eq!(err.path, "confidence_score");
    assert_eq!(err.expected, "number");
    assert_eq!(err.found, "string");
}

#[test]
fn out_of_range_confidence_score_is_rejected() {
    let mut candidate = well_formed();
    candidate["confidence_score"] = json!(1.5);

    let err = validate(&candidate).unwrap_err();
    assert_eq!(err.path, "confidence_score");
    assert_eq!(err.expected, "number in [0.0, 1.0]");
}

#[test]
fn absent_confidence_score_is_allowed() {
    let mut candidate = well_formed();
    candidate.as_object_mut().unwrap().remove("confidence_score");

    let result = validate(&candidate).expect("confidence_score is optional");
    assert!(result.confidence_score.is_none());
}

#[test]
fn null_confidence_score_is_treated_as_absent() {
    let mut candidate = well_formed();
    candidate["confidence_score"] = json!(null);

    let result = validate(&candidate).expect("null confidence_score is tolerated");
    assert!(result.confidence_score.is_none());
}

#[test]
fn missing_sugar_level_names_the_nested_path() {
    let mut candidate = well_formed();
    candidate["sugar_info"].as_object_mut().unwrap().remove("level");

    let err = validate(&candidate).unwrap_err();
    assert_eq!(err.path, "sugar_info.level");
    assert_eq!(err.found, "missing");
}

#[test]
fn non_string_suitability_entry_is_rejected() {
    let mut candidate = well_formed();
    candidate["suitability"]["best_for"] = json!(["athletes", 7]);

    let err = validate(&candidate).unwrap_err();
    assert_eq!(err.path, "suitability.best_for[1]");
    assert_eq!(err.expected, "string");
    assert_eq!(err.found, "number");
}

#[test]
fn non_object_candidate_is_rejected() {
    let err = validate(&json!(["not", "an", "object"])).unwrap_err();
    assert_eq!(err.path, "$");
    assert_eq!(err.expected, "object");
    assert_eq!(err.found, "array");
}

#[test]
fn error_display_is_diagnosable() {
    let mut candidate = well_formed();
    candidate["verdict"] = json!(42);

    let err = validate(&candidate).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("verdict"), "message should name the path: {msg}");
    assert!(msg.contains("string"), "message should name the expected type: {msg}");
    assert!(msg.contains("number"), "message should name the found type: {msg}");
}
