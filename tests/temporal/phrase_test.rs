// tests/temporal/phrase_test.rs
#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Weekday};
    use tempora::error::ResolveError;
    use tempora::temporal::{resolve, ResolvedSpan, ResolverOptions, TemporalResolver};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn range(start: NaiveDate, end: NaiveDate) -> ResolvedSpan {
        ResolvedSpan::DateRange { start, end }
    }

    fn resolve_default(expression: &str, reference: NaiveDate) -> ResolvedSpan {
        resolve(expression, reference, &ResolverOptions::default()).unwrap()
    }

    #[test]
    fn test_today_and_yesterday() {
        let reference = date(2025, 7, 17);
        assert_eq!(resolve_default("today", reference), range(reference, reference));
        assert_eq!(
            resolve_default("yesterday", reference),
            range(date(2025, 7, 16), date(2025, 7, 16))
        );
    }

    #[test]
    fn test_last_month_handles_short_february() {
        assert_eq!(
            resolve_default("last month", date(2025, 3, 10)),
            range(date(2025, 2, 1), date(2025, 2, 28))
        );
        // Year boundary.
        assert_eq!(
            resolve_default("last month", date(2025, 1, 5)),
            range(date(2024, 12, 1), date(2024, 12, 31))
        );
    }

    #[test]
    fn test_this_and_last_year() {
        let reference = date(2025, 7, 17);
        assert_eq!(
            resolve_default("this year", reference),
            range(date(2025, 1, 1), date(2025, 12, 31))
        );
        assert_eq!(
            resolve_default("last year", reference),
            range(date(2024, 1, 1), date(2024, 12, 31))
        );
    }

    #[test]
    fn test_configured_week_start() {
        let options = ResolverOptions {
            week_start: Weekday::Sun,
            ..ResolverOptions::default()
        };
        // 2025-07-17 is a Thursday; the Sunday-aligned week is 07-13..07-19.
        assert_eq!(
            resolve("this week", date(2025, 7, 17), &options).unwrap(),
            range(date(2025, 7, 13), date(2025, 7, 19))
        );
    }

    #[test]
    fn test_loose_fallback_matches_embedded_phrases() {
        let reference = date(2025, 7, 17);
        assert_eq!(
            resolve_default("show me data for last week please", reference),
            resolve_default("last week", reference)
        );
        assert_eq!(
            resolve_default("overall numbers in this month so far", reference),
            resolve_default("this month", reference)
        );
        // "as of yesterday" wins over the bare "yesterday" it contains.
        assert_eq!(
            resolve_default("totals as of yesterday", reference),
            range(date(1970, 1, 1), date(2025, 7, 16))
        );
    }

    #[test]
    fn test_loose_fallback_can_be_disabled() {
        let options = ResolverOptions {
            loose_phrase_fallback: false,
            ..ResolverOptions::default()
        };
        let err = resolve("show me data for last week please", date(2025, 7, 17), &options)
            .unwrap_err();
        assert!(matches!(err, ResolveError::UnrecognizedExpression { .. }));

        // Whole-string phrases still resolve without the fallback.
        assert!(resolve("last week", date(2025, 7, 17), &options).is_ok());
    }

    #[test]
    fn test_custom_epoch() {
        let options = ResolverOptions {
            epoch: date(2020, 1, 1),
            ..ResolverOptions::default()
        };
        assert_eq!(
            resolve("till date", date(2025, 7, 17), &options).unwrap(),
            range(date(2020, 1, 1), date(2025, 7, 17))
        );
    }

    #[test]
    fn test_memoized_resolver_agrees_with_pure_function() {
        let options = ResolverOptions::default();
        let resolver = TemporalResolver::new(options.clone());
        let reference = date(2025, 7, 17);
        for expression in ["today", "last quarter", "season 2025", "not a phrase"] {
            assert_eq!(
                resolver.resolve(expression, reference),
                resolve(expression, reference, &options)
            );
        }
    }
}
