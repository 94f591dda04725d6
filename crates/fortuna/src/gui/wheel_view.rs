use super::images::WheelImages;
use super::label;
use super::theme::ThemeColors;
use cairo::Context;
use fortuna_core::Wheel;
use fortuna_core::config::LabelAlign;
use fortuna_core::geom::WheelGeometry;
use fortuna_core::gesture::DragSample;
use fortuna_core::layout::Segment;
use gdk_pixbuf::Pixbuf;
use gdk4::prelude::*;
use palette::{FromColor, Hsl, Srgb, Srgba};
use std::f64::consts::PI;

/// cairo measures angles from east; the wheel measures them from north.
const ARC_ADJUST: f64 = -90.0;
const POINTER_LENGTH: f64 = 0.12;
const POINTER_HALF_WIDTH: f64 = 6.0;
const TRAIL_DOT_RADIUS: f64 = 5.0;

fn deg_rad(deg: f64) -> f64 {
    (deg + ARC_ADJUST).to_radians()
}

fn set_color(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

struct SegmentRenderer<'a> {
    wheel: &'a Wheel,
    geometry: &'a WheelGeometry,
    segment: &'a Segment,
}

impl<'a> SegmentRenderer<'a> {
    fn new(wheel: &'a Wheel, segment: &'a Segment) -> Self {
        Self {
            wheel,
            geometry: wheel.geometry(),
            segment,
        }
    }

    fn start(&self) -> f64 {
        self.wheel.rotation() + self.segment.start_angle
    }

    fn end(&self) -> f64 {
        self.wheel.rotation() + self.segment.end_angle
    }

    fn draw_wedge(&self, cr: &Context) -> Result<(), cairo::Error> {
        let Some(item) = self.wheel.item(self.segment.index) else {
            return Ok(());
        };
        let settings = self.wheel.settings();
        let center = self.geometry.center;

        cr.move_to(center.x, center.y);
        cr.arc(
            center.x,
            center.y,
            self.geometry.radius,
            deg_rad(self.start()),
            deg_rad(self.end()),
        );
        cr.close_path();

        let (r, g, b) = item.background_color.to_f64();
        cr.set_source_rgb(r, g, b);
        if settings.line_width <= 0.0 {
            return cr.fill();
        }
        cr.fill_preserve()?;

        let (r, g, b) = settings.line_color.to_f64();
        cr.set_source_rgb(r, g, b);
        cr.set_line_width(settings.line_width);
        cr.set_line_join(cairo::LineJoin::Bevel);
        cr.stroke()
    }

    fn draw_label(
        &self,
        cr: &Context,
        font_size: f64,
        colors: &ThemeColors,
    ) -> Result<(), cairo::Error> {
        let Some(item) = self.wheel.item(self.segment.index) else {
            return Ok(());
        };
        let settings = self.wheel.settings();
        let style = &settings.label;
        let center = self.geometry.center;
        let angle = deg_rad(self.wheel.rotation() + self.segment.mid_angle());
        let anchor = self.geometry.radius * style.radius;

        cr.save()?;
        cr.translate(
            center.x + angle.cos() * anchor,
            center.y + angle.sin() * anchor,
        );
        cr.rotate(angle);

        if settings.debug {
            let max_width = label::label_max_width(self.geometry, style);
            set_color(cr, colors.debug);
            cr.set_line_width(1.0);
            cr.move_to(0.0, 0.0);
            cr.line_to(-max_width, 0.0);
            cr.rectangle(0.0, -font_size / 2.0, -max_width, font_size);
            cr.stroke()?;
        }

        cr.rotate(style.rotation.to_radians());

        let text = item.label.as_str();
        if !text.is_empty() {
            let ext = cr.text_extents(text)?;
            let x = match style.align {
                LabelAlign::Left => 0.0,
                LabelAlign::Center => -ext.x_advance() / 2.0,
                LabelAlign::Right => -ext.x_advance(),
            };
            // vertically centered, then nudged by the baseline offset
            let y = -(ext.y_bearing() + ext.height() / 2.0) + font_size * -style.baseline_offset;

            let (r, g, b) = item.label_color.to_f64();
            cr.set_source_rgb(r, g, b);
            cr.move_to(x, y);
            cr.show_text(text)?;
        }

        cr.restore()
    }
}

fn draw_image(
    cr: &Context,
    wheel: &Wheel,
    pixbuf: &Pixbuf,
    is_overlay: bool,
) -> Result<(), cairo::Error> {
    let geometry = wheel.geometry();
    // the wheel image is scaled to the wedges so changing `radius` needs no new artwork
    let size = if is_overlay {
        geometry.size
    } else {
        geometry.size * wheel.settings().radius
    };
    let (pw, ph) = (pixbuf.width() as f64, pixbuf.height() as f64);
    if size <= 0.0 || pw <= 0.0 || ph <= 0.0 {
        return Ok(());
    }

    cr.save()?;
    cr.translate(geometry.center.x, geometry.center.y);
    if !is_overlay {
        cr.rotate(wheel.rotation().to_radians());
    }
    cr.translate(-size / 2.0, -size / 2.0);
    cr.scale(size / pw, size / ph);
    cr.set_source_pixbuf(pixbuf, 0.0, 0.0);
    cr.paint()?;
    cr.restore()
}

fn draw_pointer(cr: &Context, wheel: &Wheel, colors: &ThemeColors) -> Result<(), cairo::Error> {
    let geometry = wheel.geometry();
    let angle = deg_rad(wheel.settings().pointer_angle);
    let (tip, base) = (
        geometry.radius * (1.0 - POINTER_LENGTH),
        geometry.radius + POINTER_HALF_WIDTH,
    );

    cr.save()?;
    cr.translate(geometry.center.x, geometry.center.y);
    cr.rotate(angle);
    cr.move_to(tip, 0.0);
    cr.line_to(base, -POINTER_HALF_WIDTH);
    cr.line_to(base, POINTER_HALF_WIDTH);
    cr.close_path();
    set_color(cr, colors.pointer);
    cr.fill_preserve()?;
    set_color(cr, colors.pointer_outline);
    cr.set_line_width(1.0);
    cr.stroke()?;
    cr.restore()
}

/// HSL lightness of the `i`th trail dot, newest first: white at the head, darkening
/// towards the oldest sample.
fn trail_lightness(i: usize, len: usize) -> f64 {
    1.0 - i as f64 / len as f64
}

fn draw_drag_trail(cr: &Context, trail: &[DragSample]) -> Result<(), cairo::Error> {
    for (i, sample) in trail.iter().enumerate().rev() {
        let lightness = trail_lightness(i, trail.len());
        let fill: Srgb<f64> = Srgb::from_color(Hsl::new(200.0, 1.0, lightness));
        let (r, g, b) = fill.into_components();

        cr.arc(sample.point.x, sample.point.y, TRAIL_DOT_RADIUS, 0.0, 2.0 * PI);
        cr.set_source_rgb(r, g, b);
        cr.fill_preserve()?;
        cr.set_source_rgb(0.0, 0.0, 0.0);
        cr.set_line_width(0.5);
        cr.stroke()?;
    }
    Ok(())
}

fn draw_placeholder(cr: &Context, wheel: &Wheel, colors: &ThemeColors) -> Result<(), cairo::Error> {
    let geometry = wheel.geometry();
    set_color(cr, colors.placeholder);
    cr.arc(
        geometry.center.x,
        geometry.center.y,
        geometry.radius,
        0.0,
        2.0 * PI,
    );
    cr.fill()
}

pub fn draw(
    cr: &Context,
    wheel: &Wheel,
    images: &WheelImages,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    if wheel.geometry().radius <= 0.0 {
        return Ok(());
    }

    let renderers: Vec<_> = wheel
        .layout()
        .segments()
        .iter()
        .map(|segment| SegmentRenderer::new(wheel, segment))
        .collect();

    if wheel.layout().is_degenerate() {
        draw_placeholder(cr, wheel, colors)?;
    }

    for renderer in &renderers {
        renderer.draw_wedge(cr)?;
    }

    let font_size = label::fit_font_size(cr, wheel);
    cr.set_font_size(font_size);
    for renderer in &renderers {
        renderer.draw_label(cr, font_size, colors)?;
    }

    if let Some(image) = &images.image {
        draw_image(cr, wheel, image, false)?;
    }
    if let Some(overlay) = &images.overlay {
        draw_image(cr, wheel, overlay, true)?;
    }

    draw_pointer(cr, wheel, colors)?;

    if wheel.settings().debug {
        draw_drag_trail(cr, &wheel.drag_trail())?;
    }
    Ok(())
}
