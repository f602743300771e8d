use crate::rules::RankedRule;

/// Two-decimal rendering of a score, `n/a` when there is none.
pub fn format_score(score: Option<f64>) -> String {
    match score {
        Some(value) => format!("{:.2}", value),
        None => "n/a".to_string(),
    }
}

pub fn format_percent(fraction: f64) -> String {
    format!("{:.2} %", fraction * 100.0)
}

/// One-line rendering: rule, statistics and semantic coherence.
pub fn format_rule_line(ranked: &RankedRule) -> String {
    format!(
        "{} [conf={:.2},supp={:.2}] SC: {}",
        ranked.rule,
        ranked.rule.confidence,
        ranked.rule.support,
        format_score(ranked.coherence)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(Some(0.456)), "0.46");
        assert_eq!(format_score(Some(1.0)), "1.00");
        assert_eq!(format_score(Some(-0.2)), "-0.20");
        assert_eq!(format_score(None), "n/a");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.9333), "93.33 %");
        assert_eq!(format_percent(1.0), "100.00 %");
    }
}
