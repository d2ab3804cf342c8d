use crate::models::OutlierResult;
use crate::utils::compare_desc_nan_last;

/// Sort by outlier score, highest first, and keep at most `max_results`.
///
/// The sort is stable: results with equal scores stay in the order the
/// catalog returned them.
pub fn assemble(mut results: Vec<OutlierResult>, max_results: usize) -> Vec<OutlierResult> {
    results.sort_by(|a, b| compare_desc_nan_last(a.outlier_score, b.outlier_score));
    results.truncate(max_results);
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Channel, ScoreComponents, Video};
    use chrono::Utc;

    fn result(id: &str, score: f64) -> OutlierResult {
        OutlierResult {
            video: Video {
                id: id.to_string(),
                title: String::new(),
                description: String::new(),
                channel_id: "c".to_string(),
                channel_title: String::new(),
                published_at: Utc::now(),
                thumbnail_url: String::new(),
                view_count: 0,
                like_count: 0,
                comment_count: 0,
                duration: String::new(),
                duration_seconds: 0,
            },
            channel: Channel {
                id: "c".to_string(),
                title: String::new(),
                description: String::new(),
                thumbnail_url: String::new(),
                subscriber_count: 0,
                video_count: 0,
                view_count: 0,
            },
            outlier_score: score,
            score_components: ScoreComponents {
                view_ratio: 0.0,
                engagement_rate: 0.0,
                velocity_score: 0.0,
                channel_potential: 0.0,
            },
        }
    }

    fn ids(results: &[OutlierResult]) -> Vec<&str> {
        results.iter().map(|r| r.video.id.as_str()).collect()
    }

    #[test]
    fn ties_keep_encounter_order() {
        let input = vec![
            result("candidate-1", 72.3),
            result("candidate-2", 45.0),
            result("candidate-3", 72.3),
        ];
        let out = assemble(input, 3);
        assert_eq!(ids(&out), vec!["candidate-1", "candidate-3", "candidate-2"]);
    }

    #[test]
    fn truncates_but_never_pads() {
        let input: Vec<_> = (0..10).map(|i| result(&format!("v{i}"), i as f64)).collect();
        let out = assemble(input, 3);
        assert_eq!(ids(&out), vec!["v9", "v8", "v7"]);

        let out = assemble(vec![result("only", 1.0)], 50);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn output_has_no_inversions() {
        let scores = [12.5, 99.1, 0.0, 45.0, 45.0, 78.2, 3.3];
        let input: Vec<_> = scores
            .iter()
            .enumerate()
            .map(|(i, s)| result(&format!("v{i}"), *s))
            .collect();
        let out = assemble(input, 5);
        assert_eq!(out.len(), 5);
        assert!(out
            .windows(2)
            .all(|pair| pair[0].outlier_score >= pair[1].outlier_score));
    }

    #[test]
    fn empty_input_is_empty_output() {
        assert!(assemble(Vec::new(), 10).is_empty());
    }
}
