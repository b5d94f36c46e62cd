//! Rendered text for subscription alerts.
//!
//! Alerts snapshot their subject and message at generation time, so renaming
//! a subscription later does not rewrite text already queued for delivery.

use chrono::{DateTime, Utc};

/// Format a date the way it appears in customer-facing text, e.g. "April 1, 2024".
pub fn long_date(date: DateTime<Utc>) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Subject and message for an expiration warning firing `days` days before
/// the subscription ends.
pub fn expiration_alert_text(
    subscription_name: &str,
    end_date: DateTime<Utc>,
    days: i32,
) -> (String, String) {
    let subject = format!("Subscription Expiring in {} Days", days);
    let message = format!(
        "Your subscription \"{}\" will expire on {}.",
        subscription_name,
        long_date(end_date)
    );
    (subject, message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn long_date_is_localized_without_zero_padding() {
        let date = Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap();
        assert_eq!(long_date(date), "April 1, 2024");

        let date = Utc.with_ymd_and_hms(2023, 12, 25, 18, 30, 0).unwrap();
        assert_eq!(long_date(date), "December 25, 2023");
    }

    #[test]
    fn expiration_text_interpolates_days_name_and_date() {
        let end = Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap();
        let (subject, message) = expiration_alert_text("Premium Care Plan", end, 7);

        assert_eq!(subject, "Subscription Expiring in 7 Days");
        assert_eq!(
            message,
            "Your subscription \"Premium Care Plan\" will expire on April 1, 2024."
        );
    }
}
