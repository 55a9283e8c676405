//! Canonical product-code formatting.

use sku_model::{ABSENT_MARKER, CatalogRecord, Combination};

/// Render a ratio zero-padded to at least three digits.
pub fn format_ratio(ratio: u32) -> String {
    format!("{ratio:03}")
}

/// Hyphen-joined code: size, ratio, shaft (only when present), backlash.
pub fn format_sku(combination: &Combination<'_>) -> String {
    let ratio = format_ratio(combination.ratio);
    match combination.shaft {
        Some(shaft) => format!(
            "{}-{}-{}-{}",
            combination.size, ratio, shaft, combination.backlash
        ),
        None => format!("{}-{}-{}", combination.size, ratio, combination.backlash),
    }
}

/// Build the tabular record for one combination of the named series.
pub fn to_record(series: &str, combination: &Combination<'_>) -> CatalogRecord {
    CatalogRecord {
        series: series.to_string(),
        size: combination.size.to_string(),
        ratio: format_ratio(combination.ratio),
        shaft_option: combination.shaft.unwrap_or(ABSENT_MARKER).to_string(),
        backlash: combination.backlash.to_string(),
        sku: format_sku(combination),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_ratio_to_three_digits() {
        assert_eq!(format_ratio(3), "003");
        assert_eq!(format_ratio(42), "042");
        assert_eq!(format_ratio(100), "100");
        assert_eq!(format_ratio(1200), "1200");
    }

    #[test]
    fn shaft_segment_present() {
        let combination = Combination {
            size: "AB042",
            ratio: 3,
            shaft: Some("S1"),
            backlash: "P0",
        };
        assert_eq!(format_sku(&combination), "AB042-003-S1-P0");
    }

    #[test]
    fn shaft_segment_omitted() {
        let combination = Combination {
            size: "AD047",
            ratio: 16,
            shaft: None,
            backlash: "P1",
        };
        assert_eq!(format_sku(&combination), "AD047-016-P1");
        let record = to_record("AD Series", &combination);
        assert_eq!(record.shaft_option, "N/A");
        assert_eq!(record.ratio, "016");
        assert_eq!(record.series, "AD Series");
    }
}
