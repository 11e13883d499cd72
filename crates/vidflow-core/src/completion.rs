use crate::video::Video;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder marking unfinished prose.
pub const FIXME_TOKEN: &str = "FIXME:";

// ---------------------------------------------------------------------------
// Criterion
// ---------------------------------------------------------------------------

/// Rule deciding whether a field's current value counts as done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    FilledOnly,
    TrueOnly,
    FalseOnly,
    EmptyOrFilled,
    NoFixme,
    ConditionalSponsorship,
    ConditionalSponsors,
}

impl Criterion {
    pub fn all() -> &'static [Criterion] {
        &[
            Criterion::FilledOnly,
            Criterion::TrueOnly,
            Criterion::FalseOnly,
            Criterion::EmptyOrFilled,
            Criterion::NoFixme,
            Criterion::ConditionalSponsorship,
            Criterion::ConditionalSponsors,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Criterion::FilledOnly => "filled_only",
            Criterion::TrueOnly => "true_only",
            Criterion::FalseOnly => "false_only",
            Criterion::EmptyOrFilled => "empty_or_filled",
            Criterion::NoFixme => "no_fixme",
            Criterion::ConditionalSponsorship => "conditional_sponsorship",
            Criterion::ConditionalSponsors => "conditional_sponsors",
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Criterion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Criterion::all()
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown completion criterion: {s}"))
    }
}

// ---------------------------------------------------------------------------
// FieldValue
// ---------------------------------------------------------------------------

/// A field's current value, tagged by shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
    List(Vec<serde_json::Value>),
    Number(f64),
    Map(serde_json::Map<String, serde_json::Value>),
    Missing,
}

impl FieldValue {
    pub fn text(s: impl Into<String>) -> Self {
        FieldValue::Text(s.into())
    }

    /// The generic "has something in it" rule: non-empty text (including
    /// `"-"` and `"N/A"`), `true`, or a non-empty list. Numbers, maps and
    /// missing values never count.
    pub fn is_filled(&self) -> bool {
        match self {
            FieldValue::Text(s) => !s.is_empty(),
            FieldValue::Flag(b) => *b,
            FieldValue::List(items) => !items.is_empty(),
            FieldValue::Number(_) | FieldValue::Map(_) | FieldValue::Missing => false,
        }
    }

    pub fn from_json(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::String(s) => FieldValue::Text(s),
            Value::Bool(b) => FieldValue::Flag(b),
            Value::Array(items) => FieldValue::List(items),
            Value::Number(n) => n.as_f64().map(FieldValue::Number).unwrap_or(FieldValue::Missing),
            Value::Object(map) => FieldValue::Map(map),
            Value::Null => FieldValue::Missing,
        }
    }
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

/// Decide whether `value` satisfies `criterion`. `item` supplies the
/// sponsorship context the conditional criteria depend on.
pub fn is_complete(value: &FieldValue, criterion: Criterion, item: &Video) -> bool {
    match criterion {
        Criterion::FilledOnly => value.is_filled(),
        Criterion::TrueOnly => matches!(value, FieldValue::Flag(true)),
        Criterion::FalseOnly => matches!(value, FieldValue::Flag(false)),
        Criterion::EmptyOrFilled => true,
        Criterion::NoFixme => match value {
            FieldValue::Text(s) => !s.contains(FIXME_TOKEN),
            _ => true,
        },
        Criterion::ConditionalSponsorship => {
            !item.sponsorship.is_sponsored() || value.is_filled()
        }
        Criterion::ConditionalSponsors => {
            !item.sponsorship.is_sponsored() || matches!(value, FieldValue::Flag(true))
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn blank() -> Video {
        Video::new("v", "c")
    }

    fn sponsored(amount: &str) -> Video {
        let mut v = blank();
        v.sponsorship.amount = amount.to_string();
        v
    }

    #[test]
    fn filled_only_treats_placeholders_as_done() {
        let item = blank();
        for s in ["-", "N/A", "x", "a longer value"] {
            assert!(
                is_complete(&FieldValue::text(s), Criterion::FilledOnly, &item),
                "{s:?} should be filled"
            );
        }
        assert!(!is_complete(&FieldValue::text(""), Criterion::FilledOnly, &item));
    }

    #[test]
    fn filled_only_on_lists() {
        let item = blank();
        assert!(!is_complete(&FieldValue::List(vec![]), Criterion::FilledOnly, &item));
        assert!(is_complete(
            &FieldValue::List(vec![serde_json::json!({"title": "t", "id": "i"})]),
            Criterion::FilledOnly,
            &item
        ));
    }

    #[test]
    fn boolean_criteria() {
        let item = blank();
        assert!(is_complete(&FieldValue::Flag(true), Criterion::TrueOnly, &item));
        assert!(!is_complete(&FieldValue::Flag(false), Criterion::TrueOnly, &item));
        assert!(is_complete(&FieldValue::Flag(false), Criterion::FalseOnly, &item));
        assert!(!is_complete(&FieldValue::Flag(true), Criterion::FalseOnly, &item));
        assert!(!is_complete(&FieldValue::Missing, Criterion::FalseOnly, &item));
    }

    #[test]
    fn empty_or_filled_always_done() {
        let item = blank();
        for v in [FieldValue::text(""), FieldValue::text("x"), FieldValue::Missing] {
            assert!(is_complete(&v, Criterion::EmptyOrFilled, &item));
        }
    }

    #[test]
    fn no_fixme() {
        let item = blank();
        assert!(is_complete(&FieldValue::text("00:00 Intro"), Criterion::NoFixme, &item));
        assert!(is_complete(&FieldValue::text(""), Criterion::NoFixme, &item));
        assert!(!is_complete(
            &FieldValue::text("00:00 Intro\nFIXME: rest"),
            Criterion::NoFixme,
            &item
        ));
        assert!(is_complete(&FieldValue::text("fixme later"), Criterion::NoFixme, &item));
    }

    #[test]
    fn conditional_sponsorship() {
        let emails = FieldValue::text("sponsor@example.com");
        let none = FieldValue::text("");

        for amount in ["", "-", "N/A"] {
            assert!(is_complete(&none, Criterion::ConditionalSponsorship, &sponsored(amount)));
        }
        assert!(!is_complete(&none, Criterion::ConditionalSponsorship, &sponsored("1000")));
        assert!(!is_complete(&none, Criterion::ConditionalSponsorship, &sponsored(" ")));
        assert!(is_complete(&emails, Criterion::ConditionalSponsorship, &sponsored("1000")));
    }

    #[test]
    fn conditional_sponsors() {
        for amount in ["", "-", "N/A"] {
            assert!(is_complete(
                &FieldValue::Flag(false),
                Criterion::ConditionalSponsors,
                &sponsored(amount)
            ));
        }
        assert!(!is_complete(
            &FieldValue::Flag(false),
            Criterion::ConditionalSponsors,
            &sponsored("1000")
        ));
        assert!(is_complete(
            &FieldValue::Flag(true),
            Criterion::ConditionalSponsors,
            &sponsored("1000")
        ));
    }

    #[test]
    fn generic_rule_agrees_on_strings() {
        let item = blank();
        for s in ["", "-", "N/A", "value"] {
            let v = FieldValue::text(s);
            assert_eq!(v.is_filled(), is_complete(&v, Criterion::FilledOnly, &item));
        }
    }

    #[test]
    fn generic_rule_ignores_numbers_maps_and_missing() {
        assert!(!FieldValue::Number(3.0).is_filled());
        assert!(!FieldValue::Map(serde_json::Map::new()).is_filled());
        assert!(!FieldValue::Missing.is_filled());
        assert!(FieldValue::Flag(true).is_filled());
        assert!(!FieldValue::Flag(false).is_filled());
    }

    #[test]
    fn from_json_tags_values() {
        assert_eq!(FieldValue::from_json(serde_json::json!("x")), FieldValue::text("x"));
        assert_eq!(FieldValue::from_json(serde_json::json!(true)), FieldValue::Flag(true));
        assert_eq!(FieldValue::from_json(serde_json::json!(null)), FieldValue::Missing);
        assert_eq!(FieldValue::from_json(serde_json::json!(2)), FieldValue::Number(2.0));
        assert!(matches!(
            FieldValue::from_json(serde_json::json!({"a": 1})),
            FieldValue::Map(_)
        ));
    }

    #[test]
    fn criterion_tags_roundtrip() {
        for c in Criterion::all() {
            assert_eq!(Criterion::from_str(c.as_str()).unwrap(), *c);
            let json = serde_json::to_string(c).unwrap();
            assert_eq!(json, format!("\"{}\"", c.as_str()));
        }
        assert!(Criterion::from_str("mostly_done").is_err());
    }
}
