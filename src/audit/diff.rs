//! Diff generation for audit logging
//!
//! Compares two JSON snapshots of the same record and describes the
//! top-level fields that changed. Money fields are stored in hundredths and
//! are shown as decimal amounts; timestamps that change on every write are
//! left out.

use serde_json::Value;

/// Fields that hold a `Money` amount in hundredths
const MONEY_FIELDS: &[&str] = &["amount"];

/// Fields that change on every update and carry no information
const IGNORED_FIELDS: &[&str] = &["updated_at"];

/// Generate a human-readable diff between two snapshots
///
/// Returns `None` when nothing meaningful changed.
pub fn generate_diff(before: &Value, after: &Value) -> Option<String> {
    match (before, after) {
        (Value::Object(before_obj), Value::Object(after_obj)) => {
            let mut changes = Vec::new();

            for (key, before_val) in before_obj {
                if IGNORED_FIELDS.contains(&key.as_str()) {
                    continue;
                }
                match after_obj.get(key) {
                    Some(after_val) if before_val != after_val => changes.push(format!(
                        "{}: {} -> {}",
                        key,
                        format_field(key, before_val),
                        format_field(key, after_val)
                    )),
                    Some(_) => {}
                    None => changes.push(format!(
                        "{}: {} -> (removed)",
                        key,
                        format_field(key, before_val)
                    )),
                }
            }

            for (key, after_val) in after_obj {
                if !before_obj.contains_key(key) && !IGNORED_FIELDS.contains(&key.as_str()) {
                    changes.push(format!("{}: (added) -> {}", key, format_field(key, after_val)));
                }
            }

            if changes.is_empty() {
                None
            } else {
                Some(changes.join(", "))
            }
        }
        _ if before != after => Some(format!(
            "{} -> {}",
            format_value(before),
            format_value(after)
        )),
        _ => None,
    }
}

fn format_field(key: &str, value: &Value) -> String {
    match value {
        Value::Number(n) if MONEY_FIELDS.contains(&key) => match n.as_i64() {
            Some(cents) => crate::models::Money::from_cents(cents).to_string(),
            None => n.to_string(),
        },
        _ => format_value(value),
    }
}

/// Format a JSON value for display
fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "none".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => {
            if s.chars().count() > 50 {
                let head: String = s.chars().take(47).collect();
                format!("\"{}...\"", head)
            } else {
                format!("\"{}\"", s)
            }
        }
        Value::Array(arr) if arr.iter().all(Value::is_number) => {
            let items: Vec<String> = arr.iter().map(|v| v.to_string()).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_money_field_change() {
        let before = json!({"name": "Husleje", "amount": 1200000});
        let after = json!({"name": "Husleje", "amount": 1250050});

        let diff = generate_diff(&before, &after).unwrap();
        assert_eq!(diff, "amount: 12000.00 -> 12500.50");
    }

    #[test]
    fn test_months_shown_as_list() {
        let before = json!({"months": null});
        let after = json!({"months": [3, 9]});

        let diff = generate_diff(&before, &after).unwrap();
        assert_eq!(diff, "months: none -> [3, 9]");
    }

    #[test]
    fn test_field_added_and_removed() {
        let before = json!({"name": "Netflix", "account": "Budgetkonto"});
        let after = json!({"name": "Netflix", "category": "Abonnementer"});

        let diff = generate_diff(&before, &after).unwrap();
        assert!(diff.contains("account: \"Budgetkonto\" -> (removed)"));
        assert!(diff.contains("category: (added) -> \"Abonnementer\""));
    }

    #[test]
    fn test_updated_at_is_ignored() {
        let before = json!({"name": "Mad", "updated_at": "2025-01-01T00:00:00Z"});
        let after = json!({"name": "Mad", "updated_at": "2025-02-01T00:00:00Z"});

        assert!(generate_diff(&before, &after).is_none());
    }

    #[test]
    fn test_multiple_changes() {
        let before = json!({"frequency": "monthly", "amount": 100});
        let after = json!({"frequency": "yearly", "amount": 1200});

        let diff = generate_diff(&before, &after).unwrap();
        assert!(diff.contains("frequency: \"monthly\" -> \"yearly\""));
        assert!(diff.contains("amount: 1.00 -> 12.00"));
    }

    #[test]
    fn test_long_string_truncation() {
        let before = json!({"name": "short"});
        let after = json!({"name": "æ".repeat(60)});

        let diff = generate_diff(&before, &after).unwrap();
        assert!(diff.ends_with("...\""));
    }

    #[test]
    fn test_non_object_values() {
        assert_eq!(generate_diff(&json!(1), &json!(2)).unwrap(), "1 -> 2");
        assert!(generate_diff(&json!("a"), &json!("a")).is_none());
    }
}
