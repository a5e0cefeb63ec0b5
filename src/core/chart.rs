use crate::core::error::SizingError;
use crate::models::{BodyMeasurements, Dimension, SizeChart, SizeChartEntry};

/// Find the chart entry closest to the shopper on `dimension`
///
/// `measurements` must already be normalized to centimetres; chart values are
/// converted from the chart's own unit. Entries without the dimension are
/// skipped. On equal distance the entry earliest in chart order wins.
///
/// # Errors
/// * `InsufficientData` if the measurements lack `dimension`
/// * `MalformedInput` if no chart entry carries `dimension`
pub fn find_closest<'a>(
    chart: &'a SizeChart,
    measurements: &BodyMeasurements,
    dimension: Dimension,
) -> Result<&'a SizeChartEntry, SizingError> {
    let target = measurements
        .dimension(dimension)
        .ok_or_else(|| SizingError::insufficient(dimension))?;

    if chart.is_empty() {
        return Err(SizingError::MalformedInput("size chart has no entries".to_string()));
    }

    let mut best: Option<(&SizeChartEntry, f64)> = None;

    for entry in chart.entries() {
        let Some(value) = chart.dimension_cm(entry, dimension) else {
            tracing::debug!("Skipping size {} without {} value", entry.size, dimension.as_str());
            continue;
        };

        let diff = (value - target).abs();
        // Strict comparison keeps the earliest entry on ties
        if best.map_or(true, |(_, best_diff)| diff < best_diff) {
            best = Some((entry, diff));
        }
    }

    best.map(|(entry, _)| entry).ok_or_else(|| {
        SizingError::MalformedInput(format!(
            "no chart entry has a {} value",
            dimension.as_str()
        ))
    })
}
