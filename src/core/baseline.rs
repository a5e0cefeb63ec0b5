use once_cell::sync::Lazy;
use regex::Regex;
use crate::core::units::inches_to_cm;
use crate::models::BodyMeasurements;

static FIRST_INTEGER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("valid regex"));
static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-z&'\-]+").expect("valid regex"));

const SMALL: &[&str] = &["small", "s"];
const MEDIUM: &[&str] = &["medium", "m"];
const LARGE: &[&str] = &["large", "l"];

/// Heuristic that turns a self-reported size into body measurements
///
/// Rules are tried in priority order; each returns `None` when it does not apply.
#[derive(Debug, Clone)]
pub enum BaselineRule {
    /// Brands whose tag number is the waist in inches
    InchWaist { keywords: Vec<&'static str> },
    /// Brands with a fixed numeric size to waist (cm) table
    NumericTable {
        keywords: Vec<&'static str>,
        table: Vec<(u32, f64)>,
        /// cm per size unit when the number is not in the table
        fallback_factor: f64,
    },
    /// Lettered sizes (small/medium/large and their abbreviations)
    Lettered { sizes: Vec<(&'static [&'static str], f64)> },
}

impl BaselineRule {
    /// Waist in cm, if this rule recognizes the baseline
    fn apply(&self, text: &str, number: Option<u32>) -> Option<f64> {
        match self {
            BaselineRule::InchWaist { keywords } => {
                let n = number?;
                mentions_any(text, keywords).then(|| inches_to_cm(n as f64))
            }
            BaselineRule::NumericTable { keywords, table, fallback_factor } => {
                let n = number?;
                if !mentions_any(text, keywords) {
                    return None;
                }
                let waist = table
                    .iter()
                    .find(|(size, _)| *size == n)
                    .map(|(_, cm)| *cm)
                    .unwrap_or(n as f64 * fallback_factor);
                Some(waist)
            }
            BaselineRule::Lettered { sizes } => WORD.find_iter(text).find_map(|word| {
                sizes
                    .iter()
                    .find(|(names, _)| names.contains(&word.as_str()))
                    .map(|(_, cm)| *cm)
            }),
        }
    }
}

fn mentions_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

/// Default rule set, highest priority first
pub fn default_rules() -> Vec<BaselineRule> {
    vec![
        BaselineRule::InchWaist {
            keywords: vec!["levi", "denim", "wrangler"],
        },
        BaselineRule::NumericTable {
            keywords: vec!["zara", "h&m", "eu"],
            table: vec![(34, 62.0), (36, 66.0), (38, 70.0), (40, 74.0), (42, 78.0)],
            fallback_factor: 1.8,
        },
        BaselineRule::Lettered {
            sizes: vec![
                (SMALL, 68.0),
                (MEDIUM, 74.0),
                (LARGE, 82.0),
            ],
        },
    ]
}

/// Infer partial body measurements (cm) from a baseline such as "Levi's 32"
///
/// Only the waist is ever inferred. An unrecognized baseline yields an empty
/// record rather than an error.
pub fn infer_from_baseline(baseline: &str) -> BodyMeasurements {
    infer_with_rules(baseline, &default_rules())
}

pub fn infer_with_rules(baseline: &str, rules: &[BaselineRule]) -> BodyMeasurements {
    let text = baseline.trim().to_lowercase();
    let number = FIRST_INTEGER
        .find(&text)
        .and_then(|m| m.as_str().parse::<u32>().ok());

    match rules.iter().find_map(|rule| rule.apply(&text, number)) {
        Some(waist) => {
            tracing::debug!("Baseline {:?} inferred waist {:.1}cm", baseline, waist);
            BodyMeasurements {
                waist: Some(waist),
                ..Default::default()
            }
        }
        None => {
            tracing::debug!("Baseline {:?} matched no sizing rule", baseline);
            BodyMeasurements::empty()
        }
    }
}
