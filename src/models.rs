use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{AppError, AppResult};

/// Record fields as submitted for create and update. Nothing here is
/// validated; the store decides what it accepts.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct MovieInput {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default, deserialize_with = "vote_average")]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub trailer_url: Option<String>,
    #[serde(default)]
    pub full_movie_url: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

fn vote_average<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrText>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrText::Number(n)) => Ok(Some(n)),
        Some(NumberOrText::Text(s)) => parse_vote_average(&s).map_err(serde::de::Error::custom),
    }
}

/// Empty text means no rating; anything else must be a number.
pub fn parse_vote_average(raw: &str) -> Result<Option<f64>, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse().map(Some).map_err(|_| format!("vote_average must be numeric, got {raw:?}"))
}

/// Parses a record identifier taken from a path segment or query value.
///
/// Any finite number is a valid identifier. Numbers that are not integral or
/// fall outside the id column's range cannot match a row and are reported as
/// not found without touching the store.
pub fn parse_id(raw: &str) -> AppResult<i32> {
    let value: f64 = raw.trim().parse().map_err(|_| AppError::InvalidId)?;
    if !value.is_finite() {
        return Err(AppError::InvalidId);
    }
    if value.fract() != 0.0 || value < f64::from(i32::MIN) || value > f64::from(i32::MAX) {
        return Err(AppError::NotFound);
    }
    Ok(value as i32)
}

#[derive(Debug, Serialize)]
pub struct InsertOutcome {
    pub last_insert_id: u64,
    pub rows_affected: u64,
}

#[derive(Debug, Serialize)]
pub struct CreateAck {
    pub success: bool,
    pub result: InsertOutcome,
}

#[derive(Debug, Serialize)]
pub struct Ack {
    pub success: bool,
    pub message: &'static str,
}

impl Ack {
    pub fn ok(message: &'static str) -> Self {
        Self { success: true, message }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn parse_id_accepts_any_integral_number() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert_eq!(parse_id(" 7 ").unwrap(), 7);
        assert_eq!(parse_id("1.0").unwrap(), 1);
        assert_eq!(parse_id("1e0").unwrap(), 1);
    }

    #[test]
    fn parse_id_rejects_non_numbers() {
        for raw in ["abc", "", "  ", "NaN", "inf", "12abc"] {
            assert!(matches!(parse_id(raw), Err(AppError::InvalidId)), "{raw:?}");
        }
    }

    #[test]
    fn parse_id_unmatchable_numbers_are_not_found() {
        assert!(matches!(parse_id("1.5"), Err(AppError::NotFound)));
        assert!(matches!(parse_id("99999999999"), Err(AppError::NotFound)));
        assert!(matches!(parse_id("-1e12"), Err(AppError::NotFound)));
    }

    #[test]
    fn vote_average_accepts_number_or_text() {
        let from_number: MovieInput =
            serde_json::from_value(json!({ "title": "A", "vote_average": 7.5 })).unwrap();
        assert_eq!(from_number.vote_average, Some(7.5));

        let from_text: MovieInput =
            serde_json::from_value(json!({ "title": "A", "vote_average": "8.1" })).unwrap();
        assert_eq!(from_text.vote_average, Some(8.1));

        let blank: MovieInput =
            serde_json::from_value(json!({ "title": "A", "vote_average": "" })).unwrap();
        assert_eq!(blank.vote_average, None);

        let null: MovieInput =
            serde_json::from_value(json!({ "title": "A", "vote_average": null })).unwrap();
        assert_eq!(null.vote_average, None);
    }

    #[test]
    fn vote_average_rejects_non_numeric_text() {
        let err = serde_json::from_value::<MovieInput>(json!({ "vote_average": "great" }))
            .unwrap_err();
        assert!(err.to_string().contains("vote_average must be numeric"));
    }

    #[test]
    fn omitted_fields_are_none() {
        let input: MovieInput = serde_json::from_value(json!({ "title": "Only" })).unwrap();
        assert_eq!(input, MovieInput { title: Some("Only".into()), ..Default::default() });
    }
}
