use crate::error::CriteriaError;
use crate::models::{FilterCriteria, NumericInput, SearchFilters};
use crate::services::catalog::SEARCH_PAGE_SIZE;
use crate::utils::parse_form_date;

/// Parse a loosely typed form number. Blank input yields `None`.
fn parse_whole_number(
    field: &'static str,
    input: Option<&NumericInput>,
) -> Result<Option<u64>, CriteriaError> {
    match input {
        None => Ok(None),
        Some(NumericInput::Number(n)) => {
            if !n.is_finite() || n.fract() != 0.0 {
                return Err(CriteriaError::NotANumber {
                    field,
                    value: n.to_string(),
                });
            }
            if *n < 0.0 {
                return Err(CriteriaError::Negative { field });
            }
            Ok(Some(*n as u64))
        }
        Some(NumericInput::Text(text)) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            if trimmed.starts_with('-') && trimmed[1..].parse::<u64>().is_ok() {
                return Err(CriteriaError::Negative { field });
            }
            trimmed
                .parse::<u64>()
                .map(Some)
                .map_err(|_| CriteriaError::NotANumber {
                    field,
                    value: text.clone(),
                })
        }
    }
}

fn non_blank(value: Option<&String>) -> Option<String> {
    value
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn parse_date(
    field: &'static str,
    value: Option<&String>,
    end_of_day: bool,
) -> Result<Option<chrono::DateTime<chrono::Utc>>, CriteriaError> {
    match non_blank(value) {
        None => Ok(None),
        Some(raw) => parse_form_date(&raw, end_of_day)
            .map(Some)
            .ok_or(CriteriaError::InvalidDate { field, value: raw }),
    }
}

impl TryFrom<&SearchFilters> for FilterCriteria {
    type Error = CriteriaError;

    fn try_from(filters: &SearchFilters) -> Result<Self, Self::Error> {
        let keywords = filters.keywords.trim();
        if keywords.is_empty() {
            return Err(CriteriaError::EmptyKeywords);
        }

        let published_after = parse_date("publishedAfter", filters.published_after.as_ref(), false)?;
        let published_before = parse_date("publishedBefore", filters.published_before.as_ref(), true)?;
        if let (Some(after), Some(before)) = (published_after, published_before) {
            if after > before {
                return Err(CriteriaError::InvertedDateRange);
            }
        }

        let max_results = match parse_whole_number("maxResults", filters.max_results.as_ref())? {
            None => SEARCH_PAGE_SIZE,
            Some(0) => return Err(CriteriaError::ZeroMaxResults),
            Some(n) => (n as usize).min(SEARCH_PAGE_SIZE),
        };

        Ok(FilterCriteria {
            keywords: keywords.to_string(),
            language: non_blank(filters.language.as_ref()),
            region: non_blank(filters.country.as_ref()),
            published_after,
            published_before,
            min_views: parse_whole_number("minViews", filters.min_views.as_ref())?.unwrap_or(0),
            min_likes: parse_whole_number("minLikes", filters.min_likes.as_ref())?.unwrap_or(0),
            min_subscribers: parse_whole_number("minSubscribers", filters.min_subscribers.as_ref())?
                .unwrap_or(0),
            // zero reads as "no maximum", same as a blank field
            max_subscribers: parse_whole_number("maxSubscribers", filters.max_subscribers.as_ref())?
                .filter(|max| *max > 0),
            max_results,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn filters(value: serde_json::Value) -> SearchFilters {
        serde_json::from_value(value).expect("valid request body")
    }

    #[test]
    fn defaults_fill_missing_fields() {
        let criteria = FilterCriteria::try_from(&filters(json!({ "keywords": "  cooking " }))).unwrap();
        assert_eq!(criteria, FilterCriteria::for_keywords("cooking"));
    }

    #[test]
    fn numeric_strings_are_coerced() {
        let criteria = FilterCriteria::try_from(&filters(json!({
            "keywords": "test",
            "minViews": "1000",
            "minLikes": 25,
            "minSubscribers": " 10 ",
            "maxSubscribers": "9",
            "maxResults": "10"
        })))
        .unwrap();
        assert_eq!(criteria.min_views, 1000);
        assert_eq!(criteria.min_likes, 25);
        assert_eq!(criteria.min_subscribers, 10);
        assert_eq!(criteria.max_subscribers, Some(9));
        assert_eq!(criteria.max_results, 10);
    }

    #[test]
    fn blank_and_null_mean_default() {
        let criteria = FilterCriteria::try_from(&filters(json!({
            "keywords": "test",
            "language": "",
            "country": "  ",
            "publishedAfter": null,
            "publishedBefore": "",
            "minViews": "",
            "maxSubscribers": null,
            "maxResults": ""
        })))
        .unwrap();
        assert_eq!(criteria, FilterCriteria::for_keywords("test"));
    }

    #[test]
    fn zero_max_subscribers_means_unbounded() {
        for zero in [json!(0), json!("0")] {
            let criteria = FilterCriteria::try_from(&filters(json!({
                "keywords": "t",
                "maxSubscribers": zero
            })))
            .unwrap();
            assert_eq!(criteria.max_subscribers, None);
        }
    }

    #[test]
    fn rejects_non_numeric_input() {
        let err = FilterCriteria::try_from(&filters(json!({
            "keywords": "test",
            "minViews": "lots"
        })))
        .unwrap_err();
        assert_eq!(
            err,
            CriteriaError::NotANumber {
                field: "minViews",
                value: "lots".to_string()
            }
        );
    }

    #[test]
    fn rejects_negative_and_fractional() {
        let negative = FilterCriteria::try_from(&filters(json!({ "keywords": "t", "minLikes": -5 })));
        assert_eq!(negative.unwrap_err(), CriteriaError::Negative { field: "minLikes" });

        let negative_text =
            FilterCriteria::try_from(&filters(json!({ "keywords": "t", "minLikes": "-5" })));
        assert_eq!(negative_text.unwrap_err(), CriteriaError::Negative { field: "minLikes" });

        let fractional = FilterCriteria::try_from(&filters(json!({ "keywords": "t", "minViews": 10.5 })));
        assert!(matches!(
            fractional.unwrap_err(),
            CriteriaError::NotANumber { field: "minViews", .. }
        ));
    }

    #[test]
    fn rejects_empty_keywords() {
        let err = FilterCriteria::try_from(&filters(json!({ "keywords": "   " }))).unwrap_err();
        assert_eq!(err, CriteriaError::EmptyKeywords);
    }

    #[test]
    fn max_results_is_clamped_to_page_size() {
        let criteria =
            FilterCriteria::try_from(&filters(json!({ "keywords": "t", "maxResults": 500 }))).unwrap();
        assert_eq!(criteria.max_results, SEARCH_PAGE_SIZE);

        let zero = FilterCriteria::try_from(&filters(json!({ "keywords": "t", "maxResults": 0 })));
        assert_eq!(zero.unwrap_err(), CriteriaError::ZeroMaxResults);
    }

    #[test]
    fn date_bounds_are_inclusive() {
        let criteria = FilterCriteria::try_from(&filters(json!({
            "keywords": "t",
            "publishedAfter": "2024-05-01",
            "publishedBefore": "2024-05-01"
        })))
        .unwrap();
        assert_eq!(
            criteria.published_after,
            Some(Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(
            criteria.published_before,
            Some(Utc.with_ymd_and_hms(2024, 5, 1, 23, 59, 59).unwrap())
        );
    }

    #[test]
    fn rejects_bad_dates() {
        let invalid = FilterCriteria::try_from(&filters(json!({
            "keywords": "t",
            "publishedAfter": "last week"
        })));
        assert!(matches!(
            invalid.unwrap_err(),
            CriteriaError::InvalidDate { field: "publishedAfter", .. }
        ));

        let inverted = FilterCriteria::try_from(&filters(json!({
            "keywords": "t",
            "publishedAfter": "2024-06-01",
            "publishedBefore": "2024-05-01"
        })));
        assert_eq!(inverted.unwrap_err(), CriteriaError::InvertedDateRange);
    }
}
