use crate::models::{FitPreference, MaterialType, SizeChart, SizeChartEntry, UserProfile};

/// Highest confidence score a recommendation can carry
pub const MAX_SCORE: f64 = 100.0;

pub const RIGID_MATERIAL_WARNING: &str = "rigid material, limited stretch";
pub const SIZED_UP_WARNING: &str = "sized up for relaxed preference";

/// Score constants for the fit adjustment rules
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdjustmentRules {
    pub base_score: f64,
    pub stretch_bonus: f64,
    pub rigid_tight_penalty: f64,
}

impl Default for AdjustmentRules {
    fn default() -> Self {
        Self {
            base_score: 90.0,
            stretch_bonus: 3.0,
            rigid_tight_penalty: 8.0,
        }
    }
}

impl AdjustmentRules {
    /// Lowest score these rules can produce
    ///
    /// The stretch bonus and the rigid penalty never apply to the same
    /// material, so each moves the score on its own.
    pub fn floor(&self) -> f64 {
        let stretched = self.base_score + self.stretch_bonus;
        let penalized = self.base_score - self.rigid_tight_penalty;
        self.base_score.min(stretched).min(penalized)
    }

    /// Rules are usable when the score can never leave [0, 100] from below
    pub fn is_bounded(&self) -> bool {
        self.base_score.is_finite()
            && self.stretch_bonus.is_finite()
            && self.rigid_tight_penalty.is_finite()
            && self.floor() >= 0.0
            && self.base_score <= MAX_SCORE
    }
}

/// Outcome of adjusting a matched size to the shopper's material and preference
#[derive(Debug, Clone, PartialEq)]
pub struct Adjustment<'a> {
    pub final_entry: &'a SizeChartEntry,
    pub warnings: Vec<String>,
    pub score: f64,
}

/// Apply material and fit preference rules to a matched chart entry
///
/// Rules run in a fixed order:
/// 1. start from the base score
/// 2. stretch blends earn a bonus
/// 3. rigid denim worn tight is penalized and flagged
/// 4. a baggy preference moves to the next larger size, if there is one
/// 5. the score is capped at 100
pub fn adjust<'a>(
    chart: &'a SizeChart,
    matched: &'a SizeChartEntry,
    profile: &UserProfile,
    rules: &AdjustmentRules,
) -> Adjustment<'a> {
    let mut score = rules.base_score;
    let mut warnings = Vec::new();
    let mut final_entry = matched;

    if profile.material == MaterialType::StretchBlend {
        score += rules.stretch_bonus;
    }

    if profile.material == MaterialType::Denim && profile.fit_preference == FitPreference::Tight {
        score -= rules.rigid_tight_penalty;
        warnings.push(RIGID_MATERIAL_WARNING.to_string());
    }

    if profile.fit_preference == FitPreference::Baggy {
        // Already the largest size: stay put
        if let Some(next) = chart.next_larger(&matched.size) {
            final_entry = next;
            warnings.push(SIZED_UP_WARNING.to_string());
        }
    }

    Adjustment {
        final_entry,
        warnings,
        score: score.min(MAX_SCORE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClothingCategory, Gender};

    fn chart() -> SizeChart {
        SizeChart::cm(vec![
            SizeChartEntry::waist("28", 71.0),
            SizeChartEntry::waist("30", 76.0),
            SizeChartEntry::waist("32", 81.0),
            SizeChartEntry::waist("34", 86.0),
        ])
    }

    fn profile(material: MaterialType, fit_preference: FitPreference) -> UserProfile {
        UserProfile {
            gender: Gender::Unisex,
            category: ClothingCategory::Jeans,
            fit_preference,
            material,
            measurements: None,
            baseline: None,
            images: vec![],
            vision_signals: None,
        }
    }

    const MATERIALS: [MaterialType; 4] = [
        MaterialType::Denim,
        MaterialType::Cotton,
        MaterialType::StretchBlend,
        MaterialType::Linen,
    ];

    const PREFERENCES: [FitPreference; 3] =
        [FitPreference::Tight, FitPreference::Regular, FitPreference::Baggy];

    #[test]
    fn test_regular_fit_is_unchanged() {
        let chart = chart();
        let matched = &chart.entries()[2];
        let result = adjust(&chart, matched, &profile(MaterialType::Cotton, FitPreference::Regular), &AdjustmentRules::default());

        assert_eq!(result.final_entry.size, "32");
        assert!(result.warnings.is_empty());
        assert_eq!(result.score, 90.0);
    }

    #[test]
    fn test_stretch_bonus() {
        let chart = chart();
        let matched = &chart.entries()[1];
        let result = adjust(&chart, matched, &profile(MaterialType::StretchBlend, FitPreference::Regular), &AdjustmentRules::default());
        assert_eq!(result.score, 93.0);
    }

    #[test]
    fn test_rigid_denim_tight() {
        let chart = chart();
        let matched = &chart.entries()[2];
        let result = adjust(&chart, matched, &profile(MaterialType::Denim, FitPreference::Tight), &AdjustmentRules::default());

        assert_eq!(result.final_entry.size, "32");
        assert_eq!(result.score, 82.0);
        assert_eq!(result.warnings, vec![RIGID_MATERIAL_WARNING.to_string()]);
    }

    #[test]
    fn test_baggy_sizes_up() {
        let chart = chart();
        let matched = &chart.entries()[1];
        let result = adjust(&chart, matched, &profile(MaterialType::Cotton, FitPreference::Baggy), &AdjustmentRules::default());

        assert_eq!(result.final_entry.size, "32");
        assert_eq!(result.warnings, vec![SIZED_UP_WARNING.to_string()]);
    }

    #[test]
    fn test_baggy_capped_at_largest_size() {
        let chart = chart();
        let matched = &chart.entries()[3];
        let result = adjust(&chart, matched, &profile(MaterialType::Cotton, FitPreference::Baggy), &AdjustmentRules::default());

        assert_eq!(result.final_entry.size, "34");
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_score_bounded_for_all_combinations() {
        let chart = chart();
        let rules = AdjustmentRules::default();
        assert!(rules.is_bounded());

        for material in MATERIALS {
            for preference in PREFERENCES {
                for matched in chart.entries() {
                    let result = adjust(&chart, matched, &profile(material, preference), &rules);
                    assert!(
                        (0.0..=MAX_SCORE).contains(&result.score),
                        "score {} out of range for {:?}/{:?}",
                        result.score,
                        material,
                        preference
                    );
                }
            }
        }
    }

    #[test]
    fn test_score_capped_at_max() {
        let chart = chart();
        let rules = AdjustmentRules {
            base_score: 99.0,
            stretch_bonus: 5.0,
            rigid_tight_penalty: 8.0,
        };
        let result = adjust(&chart, &chart.entries()[0], &profile(MaterialType::StretchBlend, FitPreference::Tight), &rules);
        assert_eq!(result.score, MAX_SCORE);
    }

    #[test]
    fn test_unbounded_rules_detected() {
        let rules = AdjustmentRules {
            base_score: 5.0,
            stretch_bonus: 3.0,
            rigid_tight_penalty: 8.0,
        };
        assert!(!rules.is_bounded());
    }

    #[test]
    fn test_negative_stretch_bonus_lowers_floor() {
        let rules = AdjustmentRules {
            base_score: 5.0,
            stretch_bonus: -10.0,
            rigid_tight_penalty: 0.0,
        };
        assert_eq!(rules.floor(), -5.0);
        assert!(!rules.is_bounded());

        let chart = chart();
        let result = adjust(&chart, &chart.entries()[0], &profile(MaterialType::StretchBlend, FitPreference::Regular), &rules);
        assert!(result.score < 0.0);
    }
}
