use crate::import::SnapshotFields;
use crate::import::classify::ClientHeading;

const MAX_LABEL_LENGTH: usize = 255;

/// Client-identity rules. Returns every violation, in rule order, so a
/// row's outcome reports all of its problems at once.
pub fn validate_identity(heading: &ClientHeading) -> Vec<String> {
    let mut messages = Vec::new();

    match heading.identifier {
        None => messages.push("client id is required and must be numeric.".to_string()),
        Some(identifier) if identifier <= 0 => {
            messages.push("client id must be a positive number.".to_string());
        }
        Some(_) => {}
    }

    if heading.name.is_empty() {
        messages.push("client name is required.".to_string());
    } else if heading.name.chars().count() > MAX_LABEL_LENGTH {
        messages.push("client name must be 255 characters or fewer.".to_string());
    }

    messages
}

/// Financial-record rules. Amounts arrive post-coercion, so the numeric
/// rule is a finiteness check; the calendar-validity rule for the
/// uploaded date is enforced by the coercion producing a real date.
pub fn validate_financials(period: &str, fields: &SnapshotFields) -> Vec<String> {
    let mut messages = Vec::new();

    if period.is_empty() {
        messages.push("period is required.".to_string());
    } else if period.chars().count() > MAX_LABEL_LENGTH {
        messages.push("period must be 255 characters or fewer.".to_string());
    }

    for (field_name, value) in fields.amounts() {
        if !value.is_finite() {
            messages.push(format!("{field_name} must be a numeric amount."));
        }
    }

    messages
}

#[cfg(test)]
mod tests {
    use crate::import::SnapshotFields;
    use crate::import::classify::ClientHeading;

    use super::{validate_financials, validate_identity};

    #[test]
    fn identity_rules_pass_for_a_complete_heading() {
        let heading = ClientHeading {
            identifier: Some(1001),
            name: "Juan Dela Cruz".to_string(),
        };
        assert!(validate_identity(&heading).is_empty());
    }

    #[test]
    fn identity_rules_report_every_violation_in_order() {
        let heading = ClientHeading {
            identifier: None,
            name: String::new(),
        };
        let messages = validate_identity(&heading);
        assert_eq!(
            messages,
            vec![
                "client id is required and must be numeric.".to_string(),
                "client name is required.".to_string(),
            ]
        );
    }

    #[test]
    fn identity_rules_reject_overlong_names() {
        let heading = ClientHeading {
            identifier: Some(7),
            name: "x".repeat(256),
        };
        let messages = validate_identity(&heading);
        assert_eq!(
            messages,
            vec!["client name must be 255 characters or fewer.".to_string()]
        );
    }

    #[test]
    fn financial_rules_require_a_period() {
        let messages = validate_financials("", &SnapshotFields::default());
        assert_eq!(messages, vec!["period is required.".to_string()]);
    }

    #[test]
    fn financial_rules_reject_overlong_periods() {
        let period = "q".repeat(256);
        let messages = validate_financials(&period, &SnapshotFields::default());
        assert_eq!(
            messages,
            vec!["period must be 255 characters or fewer.".to_string()]
        );
    }

    #[test]
    fn financial_rules_allow_negative_amounts() {
        let fields = SnapshotFields {
            arrears: -120.0,
            ..SnapshotFields::default()
        };
        assert!(validate_financials("2024-Q1", &fields).is_empty());
    }

    #[test]
    fn financial_rules_reject_non_finite_amounts() {
        let fields = SnapshotFields {
            savings: f64::NAN,
            ..SnapshotFields::default()
        };
        let messages = validate_financials("2024-Q1", &fields);
        assert_eq!(
            messages,
            vec!["savings must be a numeric amount.".to_string()]
        );
    }
}
