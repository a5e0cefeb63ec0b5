use crate::models::{BodyMeasurements, MeasurementUnit};

/// Centimetres per inch
pub const INCH_TO_CM: f64 = 2.54;

#[inline]
pub fn inches_to_cm(value: f64) -> f64 {
    value * INCH_TO_CM
}

/// Normalize a measurement record to centimetres
///
/// Imperial records have every present length multiplied by 2.54. Weight is a
/// mass, not a length, and is carried through as supplied. Absent fields stay
/// absent. Metric records are returned unchanged, which makes this idempotent.
pub fn normalize(m: &BodyMeasurements) -> BodyMeasurements {
    match m.unit {
        MeasurementUnit::Cm => m.clone(),
        MeasurementUnit::Inch => BodyMeasurements {
            height: m.height.map(inches_to_cm),
            weight: m.weight,
            waist: m.waist.map(inches_to_cm),
            hips: m.hips.map(inches_to_cm),
            chest: m.chest.map(inches_to_cm),
            shoulders: m.shoulders.map(inches_to_cm),
            inseam: m.inseam.map(inches_to_cm),
            unit: MeasurementUnit::Cm,
        },
    }
}
