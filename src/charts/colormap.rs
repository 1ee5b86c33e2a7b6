//! Sequential yellow-orange-brown colour ramp used for sunshine bins.

use plotters::style::colors::colormaps::{ColorMap, DerivedColorMap};
use plotters::style::RGBColor;

/// Stops of the `YlOrBr` ramp, light to dark.
const YL_OR_BR: [RGBColor; 9] = [
    RGBColor(255, 255, 229),
    RGBColor(255, 247, 188),
    RGBColor(254, 227, 145),
    RGBColor(254, 196, 79),
    RGBColor(254, 153, 41),
    RGBColor(236, 112, 20),
    RGBColor(204, 76, 2),
    RGBColor(153, 52, 4),
    RGBColor(102, 37, 6),
];

/// Colour for `value` on a `[0, max]` scale.
///
/// A zero or non-finite scale, or a non-finite value, maps to the lightest stop.
pub fn yl_or_br(value: f64, max: f64) -> RGBColor {
    if !(max > 0.0 && max.is_finite() && value.is_finite()) {
        return YL_OR_BR[0];
    }
    DerivedColorMap::new(&YL_OR_BR).get_color_normalized(value, 0.0, max)
}
