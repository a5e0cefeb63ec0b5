use crate::models::BodyMeasurements;

/// Plausible range for each body measurement
///
/// Lengths are cm. Weight is never converted, so its range spans kg and lb.
const RANGES: [(&str, f64, f64); 7] = [
    ("height", 50.0, 250.0),
    ("weight", 20.0, 700.0),
    ("waist", 40.0, 180.0),
    ("hips", 50.0, 200.0),
    ("chest", 50.0, 200.0),
    ("shoulders", 25.0, 80.0),
    ("inseam", 40.0, 110.0),
];

/// Check normalized measurements for values no body could have
///
/// Returns one message per implausible field; an empty list means the input
/// looks sane. Catches typos such as a 200cm waist or inches entered as cm.
pub fn validate_measurements(m: &BodyMeasurements) -> Vec<String> {
    let values = [m.height, m.weight, m.waist, m.hips, m.chest, m.shoulders, m.inseam];

    RANGES
        .iter()
        .zip(values)
        .filter_map(|(&(name, min, max), value)| {
            let v = value?;
            if v.is_finite() && (min..=max).contains(&v) {
                None
            } else {
                Some(format!(
                    "{} of {:.1} is outside the plausible range {:.0}-{:.0}",
                    name, v, min, max
                ))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plausible_measurements() {
        let m = BodyMeasurements {
            height: Some(170.0),
            waist: Some(80.0),
            chest: Some(95.0),
            ..Default::default()
        };
        assert!(validate_measurements(&m).is_empty());
    }

    #[test]
    fn test_impossible_waist() {
        let m = BodyMeasurements {
            waist: Some(200.0),
            ..Default::default()
        };
        let issues = validate_measurements(&m);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].starts_with("waist"));
    }

    #[test]
    fn test_imperial_weight_accepted() {
        let m = crate::core::normalize(&BodyMeasurements {
            weight: Some(320.0),
            waist: Some(44.0),
            unit: crate::models::MeasurementUnit::Inch,
            ..Default::default()
        });
        assert!(validate_measurements(&m).is_empty());
    }

    #[test]
    fn test_empty_record_is_valid() {
        assert!(validate_measurements(&BodyMeasurements::empty()).is_empty());
    }
}
