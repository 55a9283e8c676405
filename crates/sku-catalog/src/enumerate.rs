//! Ordered enumeration of valid combinations.

use sku_model::{Combination, SeriesSpec};

/// Lazily enumerate every valid combination of a series.
///
/// Order is size-major (definition order), then ratio ascending, then shaft
/// option, then backlash option. Excluded (size, ratio) pairs produce nothing,
/// whatever the option counts. A series without shaft options yields a single
/// `None` shaft per pair.
pub fn combinations(spec: &SeriesSpec) -> impl Iterator<Item = Combination<'_>> + '_ {
    spec.sizes().iter().flat_map(move |size| {
        spec.ratios()
            .iter()
            .filter(move |&ratio| !spec.is_excluded(size, ratio))
            .flat_map(move |ratio| {
                shaft_slots(spec).flat_map(move |shaft| {
                    spec.backlash_options()
                        .iter()
                        .map(move |backlash| Combination {
                            size: size.as_str(),
                            ratio,
                            shaft,
                            backlash: backlash.as_str(),
                        })
                })
            })
    })
}

fn shaft_slots(spec: &SeriesSpec) -> impl Iterator<Item = Option<&str>> + '_ {
    let slots = spec.shaft_options().len().max(1);
    (0..slots).map(move |idx| spec.shaft_options().get(idx).map(String::as_str))
}

/// Number of combinations [`combinations`] yields, computed without enumerating.
pub fn expected_count(spec: &SeriesSpec) -> usize {
    (spec.grid_len() - spec.excluded_in_grid())
        * spec.shaft_options().len().max(1)
        * spec.backlash_options().len()
}
