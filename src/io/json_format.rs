//! JSON lines format handling for load attempts and decisions
//!
//! This module centralizes all wire format concerns, providing:
//! - JsonRecord structure for deserialization
//! - Money and timestamp parsing
//! - Conversion from JSON records to domain types
//! - Decision output serialization
//!
//! All functions except `write_decision` are pure (no I/O) for easy testing.

use crate::types::{Cents, Decision, LoadAttempt, VelocityError};
use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize};
use std::io::Write;
use std::str::FromStr;

/// Input record structure for deserialization
///
/// One JSON object per line with fields: id, customer_id, load_amount, time.
/// Amount and time stay as strings here and are validated by
/// `convert_json_record`.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct JsonRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(deserialize_with = "string_or_number")]
    pub customer_id: String,
    pub load_amount: String,
    pub time: String,
}

/// Output record structure for serialization
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct DecisionRecord<'a> {
    pub id: &'a str,
    pub customer_id: &'a str,
    pub accepted: bool,
}

impl<'a> From<&'a Decision> for DecisionRecord<'a> {
    fn from(decision: &'a Decision) -> Self {
        DecisionRecord {
            id: &decision.id,
            customer_id: &decision.customer_id,
            accepted: decision.accepted,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Identifier {
    Text(String),
    Number(serde_json::Number),
}

// Identifiers are strings on the wire, but numeric ids are taken as-is
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Identifier::deserialize(deserializer)? {
        Identifier::Text(text) => text,
        Identifier::Number(number) => number.to_string(),
    })
}

/// Parse a money string into integer cents
///
/// Accepts an optional `$` and `,` thousands separators (`"$1,234.56"`,
/// `"1234.56"`). The value is scaled by 100 and rounded to the nearest cent,
/// ties away from zero.
///
/// # Returns
///
/// * `Some(cents)` for a non-negative amount
/// * `None` if the string is not a number, is negative, or does not fit in cents
pub fn parse_money_cents(raw: &str) -> Option<Cents> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| *c != '$' && *c != ',')
        .collect();

    let value = Decimal::from_str(cleaned.trim()).ok()?;
    if value < Decimal::ZERO {
        return None;
    }

    value
        .checked_mul(Decimal::ONE_HUNDRED)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
}

/// Parse an ISO-8601 timestamp with offset and normalize it to UTC
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|time| time.with_timezone(&Utc))
}

/// Convert a JsonRecord to a LoadAttempt
///
/// # Arguments
///
/// * `record` - The deserialized JSON record
///
/// # Returns
///
/// * `Ok(LoadAttempt)` - Successfully converted record
/// * `Err(VelocityError)` - InvalidAmount or InvalidTimestamp
pub fn convert_json_record(record: JsonRecord) -> Result<LoadAttempt, VelocityError> {
    let amount_cents = parse_money_cents(&record.load_amount)
        .ok_or_else(|| VelocityError::invalid_amount(&record.load_amount, &record.id))?;

    let time = parse_timestamp(&record.time)
        .ok_or_else(|| VelocityError::invalid_timestamp(&record.time, &record.id))?;

    Ok(LoadAttempt {
        id: record.id,
        customer_id: record.customer_id,
        amount_cents,
        time,
    })
}

/// Decode one input line into a LoadAttempt
pub fn parse_line(line: &str) -> Result<LoadAttempt, VelocityError> {
    let record: JsonRecord = serde_json::from_str(line)?;
    convert_json_record(record)
}

/// Write one decision as a JSON line
///
/// Field order is fixed: `{"id":…,"customer_id":…,"accepted":…}`.
pub fn write_decision(decision: &Decision, output: &mut dyn Write) -> Result<(), VelocityError> {
    let line = serde_json::to_string(&DecisionRecord::from(decision))?;
    writeln!(output, "{}", line)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DeclineReason;
    use chrono::TimeZone;
    use rstest::rstest;

    #[rstest]
    #[case::dollar_sign("$3318.47", Some(331_847))]
    #[case::no_symbol("1234.56", Some(123_456))]
    #[case::thousands_separator("$1,234.56", Some(123_456))]
    #[case::whole_dollars("$5000", Some(500_000))]
    #[case::single_decimal("$0.5", Some(50))]
    #[case::one_cent("$0.01", Some(1))]
    #[case::zero("$0.00", Some(0))]
    #[case::whitespace("  $ 42.00 ", Some(4_200))]
    #[case::round_half_up("$0.005", Some(1))]
    #[case::round_down("$1666.6749", Some(166_667))]
    #[case::negative("-$5.00", None)]
    #[case::negative_after_symbol("$-5.00", None)]
    #[case::empty("", None)]
    #[case::only_symbol("$", None)]
    #[case::garbage("USD five", None)]
    fn test_parse_money_cents(#[case] raw: &str, #[case] expected: Option<Cents>) {
        assert_eq!(parse_money_cents(raw), expected);
    }

    #[rstest]
    #[case::zulu("2000-01-01T00:00:00Z", Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap())]
    #[case::positive_offset(
        "2021-01-04T01:00:00+05:00",
        Utc.with_ymd_and_hms(2021, 1, 3, 20, 0, 0).unwrap()
    )]
    #[case::negative_offset(
        "2025-10-12T22:00:00-05:00",
        Utc.with_ymd_and_hms(2025, 10, 13, 3, 0, 0).unwrap()
    )]
    fn test_parse_timestamp(#[case] raw: &str, #[case] expected: DateTime<Utc>) {
        assert_eq!(parse_timestamp(raw), Some(expected));
    }

    #[rstest]
    #[case::no_offset("2000-01-01T00:00:00")]
    #[case::date_only("2000-01-01")]
    #[case::garbage("yesterday")]
    fn test_parse_timestamp_rejects(#[case] raw: &str) {
        assert_eq!(parse_timestamp(raw), None);
    }

    #[test]
    fn test_parse_line_valid() {
        let line = r#"{"id":"15887","customer_id":"528","load_amount":"$3318.47","time":"2000-01-01T00:00:00Z"}"#;
        let attempt = parse_line(line).unwrap();

        assert_eq!(attempt.id, "15887");
        assert_eq!(attempt.customer_id, "528");
        assert_eq!(attempt.amount_cents, 331_847);
        assert_eq!(attempt.time, Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_line_numeric_identifiers() {
        let line = r#"{"id":15887,"customer_id":528,"load_amount":"$1.00","time":"2000-01-01T00:00:00Z"}"#;
        let attempt = parse_line(line).unwrap();

        assert_eq!(attempt.id, "15887");
        assert_eq!(attempt.customer_id, "528");
    }

    #[test]
    fn test_parse_line_ignores_unknown_fields() {
        let line = r#"{"id":"1","customer_id":"2","load_amount":"$1.00","time":"2000-01-01T00:00:00Z","note":"x"}"#;
        assert!(parse_line(line).is_ok());
    }

    #[rstest]
    #[case::not_json("not json", "Parse error")]
    #[case::missing_time(
        r#"{"id":"1","customer_id":"2","load_amount":"$1.00"}"#,
        "missing field `time`"
    )]
    #[case::bool_id(
        r#"{"id":true,"customer_id":"2","load_amount":"$1.00","time":"2000-01-01T00:00:00Z"}"#,
        "Parse error"
    )]
    #[case::bad_amount(
        r#"{"id":"1","customer_id":"2","load_amount":"$abc","time":"2000-01-01T00:00:00Z"}"#,
        "Invalid load amount '$abc' for load 1"
    )]
    #[case::bad_time(
        r#"{"id":"1","customer_id":"2","load_amount":"$1.00","time":"noon"}"#,
        "Invalid timestamp 'noon' for load 1"
    )]
    fn test_parse_line_errors(#[case] line: &str, #[case] expected_error: &str) {
        let error = parse_line(line).unwrap_err().to_string();
        assert!(
            error.contains(expected_error),
            "expected '{}' in '{}'",
            expected_error,
            error
        );
    }

    #[rstest]
    #[case::accepted(
        Decision { id: "15887".to_string(), customer_id: "528".to_string(), accepted: true, reason: None },
        "{\"id\":\"15887\",\"customer_id\":\"528\",\"accepted\":true}\n"
    )]
    #[case::declined_reason_not_written(
        Decision {
            id: "30081".to_string(),
            customer_id: "154".to_string(),
            accepted: false,
            reason: Some(DeclineReason::DailyLimitExceeded),
        },
        "{\"id\":\"30081\",\"customer_id\":\"154\",\"accepted\":false}\n"
    )]
    #[case::escaped_characters(
        Decision { id: "a\"b".to_string(), customer_id: "c".to_string(), accepted: true, reason: None },
        "{\"id\":\"a\\\"b\",\"customer_id\":\"c\",\"accepted\":true}\n"
    )]
    fn test_write_decision(#[case] decision: Decision, #[case] expected_output: &str) {
        let mut output = Vec::new();
        write_decision(&decision, &mut output).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), expected_output);
    }
}
