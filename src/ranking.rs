// Subject categories and ordering of the model's probabilities
use serde::Serialize;

pub const NUM_CATEGORIES: usize = 12;

/// Labels in the order of the classification head's outputs.
pub const CATEGORIES: [&str; NUM_CATEGORIES] = [
    "Astrophysics",
    "Condensed matter",
    "Computer Science",
    "Electrical Engineering and Systems Science",
    "General Relativity and Quantum Cosmology",
    "High Energy Physics - Phenomenology",
    "High Energy Physics - Theory",
    "Mathematics",
    "Mathematical Physics",
    "Physics",
    "Quantum Physics",
    "Statistics",
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategoryScore {
    pub label: &'static str,
    /// Percent, rounded to two decimals.
    pub probability: f32,
}

/// Pairs each probability with its label and sorts descending. The sort is
/// stable, so ties keep the head's output order.
pub fn rank(probabilities: [f32; NUM_CATEGORIES]) -> [CategoryScore; NUM_CATEGORIES] {
    let mut scores: [CategoryScore; NUM_CATEGORIES] = std::array::from_fn(|i| CategoryScore {
        label: CATEGORIES[i],
        probability: probabilities[i],
    });
    scores.sort_by(|a, b| b.probability.total_cmp(&a.probability));
    scores
}

/// The leading scores to show: stops right after the entry that brings the
/// running total to `threshold` or above.
pub fn displayed(ranked: &[CategoryScore], threshold: f32) -> &[CategoryScore] {
    let mut total = 0.0;
    for (i, score) in ranked.iter().enumerate() {
        total += score.probability;
        if total >= threshold {
            return &ranked[..=i];
        }
    }
    ranked
}

pub fn format_line(score: &CategoryScore) -> String {
    format!("Topic: {}, probability: {}%", score.label, score.probability)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn probs() -> [f32; NUM_CATEGORIES] {
        [
            1.5, 2.0, 0.5, 0.25, 60.0, 3.0, 25.0, 0.75, 4.0, 1.0, 1.5, 0.5,
        ]
    }

    #[test]
    fn rank_sorts_descending_with_labels() {
        let ranked = rank(probs());
        assert_eq!(ranked[0].label, "General Relativity and Quantum Cosmology");
        assert_eq!(ranked[0].probability, 60.0);
        assert_eq!(ranked[1].label, "High Energy Physics - Theory");
        assert!(ranked
            .windows(2)
            .all(|pair| pair[0].probability >= pair[1].probability));
    }

    #[test]
    fn rank_keeps_head_order_for_ties() {
        let ranked = rank(probs());
        let tied: Vec<_> = ranked
            .iter()
            .filter(|score| score.probability == 1.5)
            .map(|score| score.label)
            .collect();
        assert_eq!(tied, vec!["Astrophysics", "Quantum Physics"]);
    }

    #[test]
    fn displayed_includes_the_crossing_entry() {
        let ranked = rank(probs());
        // 60 + 25 + 4 + 3 = 92, + 2 = 94, + 1.5 = 95.5
        let shown = displayed(&ranked, 95.0);
        assert_eq!(shown.len(), 6);
        assert_eq!(shown[5].probability, 1.5);
    }

    #[test]
    fn displayed_stops_at_exact_threshold() {
        let mut probabilities = [0.0; NUM_CATEGORIES];
        probabilities[3] = 95.0;
        probabilities[7] = 5.0;
        let ranked = rank(probabilities);
        let shown = displayed(&ranked, 95.0);
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].label, "Electrical Engineering and Systems Science");
    }

    #[test]
    fn displayed_shows_everything_when_threshold_unreached() {
        let ranked = rank([7.0; NUM_CATEGORIES]);
        assert_eq!(displayed(&ranked, 95.0).len(), NUM_CATEGORIES);
    }

    #[test]
    fn line_format() {
        let score = CategoryScore {
            label: "Statistics",
            probability: 12.34,
        };
        assert_eq!(format_line(&score), "Topic: Statistics, probability: 12.34%");
    }
}
