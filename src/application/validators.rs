use validator::ValidateEmail;

/// Upper bound on a single expiration lead time, in days (10 years).
const MAX_ALERT_LEAD_DAYS: i32 = 3650;

/// Maximum number of lead times a subscription may carry.
const MAX_ALERT_LEAD_COUNT: usize = 50;

/// Validates that the input looks like a valid email address
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    !email.is_empty() && email.validate_email()
}

/// Validates a list of expiration-alert lead times.
/// Rules:
/// - At most 50 entries (an empty list is allowed: no alerts wanted)
/// - Every entry is a positive day count, at most 3650
/// - Duplicates are allowed; they intentionally produce duplicate alerts
pub fn is_valid_alert_days(days: &[i32]) -> bool {
    days.len() <= MAX_ALERT_LEAD_COUNT
        && days.iter().all(|&d| d >= 1 && d <= MAX_ALERT_LEAD_DAYS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(is_valid_email("test@example.com"));
        assert!(is_valid_email("user.name@domain.co.uk"));
        assert!(is_valid_email("user+tag@example.org"));
    }

    #[test]
    fn test_invalid_emails() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("   "));
        assert!(!is_valid_email("notanemail"));
        assert!(!is_valid_email("@nodomain.com"));
        assert!(!is_valid_email("spaces in@email.com"));
    }

    #[test]
    fn test_valid_alert_days() {
        assert!(is_valid_alert_days(&[30, 15, 7]));
        assert!(is_valid_alert_days(&[1]));
        assert!(is_valid_alert_days(&[3650]));
        assert!(is_valid_alert_days(&[7, 7, 7])); // duplicates are fine
        assert!(is_valid_alert_days(&[])); // no alerts wanted
    }

    #[test]
    fn test_invalid_alert_days_non_positive() {
        assert!(!is_valid_alert_days(&[0]));
        assert!(!is_valid_alert_days(&[-1]));
        assert!(!is_valid_alert_days(&[30, 0, 7]));
        assert!(!is_valid_alert_days(&[30, -15, 7]));
    }

    #[test]
    fn test_invalid_alert_days_out_of_range() {
        assert!(!is_valid_alert_days(&[3651]));
        let too_many: Vec<i32> = (1..=51).collect();
        assert!(!is_valid_alert_days(&too_many));
    }
}
