use fortuna_core::Wheel;
use fortuna_core::config::LabelStyle;
use fortuna_core::geom::WheelGeometry;

/// Wheel size at which `item_label_font_size_max` applies unscaled.
pub const FONT_SCALE: f64 = 500.0;

/// Room a label has between `item_label_radius` and `item_label_radius_max`.
pub fn label_max_width(geometry: &WheelGeometry, style: &LabelStyle) -> f64 {
    geometry.radius * (style.radius - style.radius_max)
}

/// Largest font size, up to the scaled maximum, at which every label fits `max_width`.
/// `unit_widths` are the labels' widths measured at a 1px font.
pub fn shrink_to_fit(
    base_size: f64,
    max_width: f64,
    unit_widths: impl IntoIterator<Item = f64>,
) -> f64 {
    unit_widths
        .into_iter()
        .filter(|w| *w > 0.0)
        .fold(base_size, |size, w| size.min(max_width / w))
        .max(0.0)
}

/// Measures every label with cairo and returns the shared font size to draw them at.
pub fn fit_font_size(cr: &cairo::Context, wheel: &Wheel) -> f64 {
    let geometry = wheel.geometry();
    let style = &wheel.settings().label;
    let base = style.font_size_max * (geometry.size / FONT_SCALE);

    cr.select_font_face(
        style.font.as_str(),
        cairo::FontSlant::Normal,
        cairo::FontWeight::Normal,
    );
    cr.set_font_size(1.0);

    let widths = wheel
        .items()
        .iter()
        .filter_map(|item| cr.text_extents(item.label.as_str()).ok())
        .map(|ext| ext.x_advance());

    shrink_to_fit(base, label_max_width(geometry, style), widths)
}
