use super::{HIGHLIGHT_WIDTH, INNER_RADIUS_RATIO, NEEDLE_TIP_RADIUS, NEEDLE_WIDTH};
use crate::config::HexColor;
use crate::gui::theme::ThemeColors;
use cairo::Context;
use colorwheel::{Point, Section, SectionRenderer, WheelController, WheelDataSource};
use palette::{Srgba, WithAlpha};
use std::f64::consts::TAU;

fn fallback_color() -> Srgba<f64> {
    Srgba::new(0.5, 0.5, 0.5, 1.0)
}

/// Fills each section as an annular wedge in its palette color.
#[derive(Debug, Clone)]
pub struct ColorSectionRenderer {
    pub colors: Vec<Srgba<f64>>,
    pub inner_ratio: f64,
}

impl ColorSectionRenderer {
    pub fn new(palette: &[HexColor]) -> Self {
        Self {
            colors: Self::convert(palette),
            inner_ratio: INNER_RADIUS_RATIO,
        }
    }

    pub fn set_palette(&mut self, palette: &[HexColor]) {
        self.colors = Self::convert(palette);
    }

    fn convert(palette: &[HexColor]) -> Vec<Srgba<f64>> {
        palette
            .iter()
            .map(|c| c.into_format::<f64>().with_alpha(1.0))
            .collect()
    }

    /// Colors repeat when there are more sections than palette entries.
    pub fn color_for(&self, index: usize) -> Srgba<f64> {
        if self.colors.is_empty() {
            return fallback_color();
        }
        self.colors[index % self.colors.len()]
    }
}

impl SectionRenderer for ColorSectionRenderer {
    type Surface = Context;
    type Error = cairo::Error;

    fn draw_section(
        &self,
        cr: &Context,
        center: Point,
        section: &Section,
    ) -> Result<(), cairo::Error> {
        let (r, g, b, a) = self.color_for(section.index).into_components();
        let start = section.start_angle;
        let end = start + section.span();
        let inner = section.radius * self.inner_ratio;

        cr.set_source_rgba(r, g, b, a);
        cr.new_path();
        cr.arc(center.x, center.y, section.radius, start, end);
        cr.arc_negative(center.x, center.y, inner, end, start);
        cr.close_path();
        cr.fill()
    }
}

pub fn draw<S, D, R>(
    cr: &Context,
    wheel: &WheelController<S, D>,
    renderer: &R,
    colors: &ThemeColors,
) -> Result<(), cairo::Error>
where
    S: WheelDataSource,
    D: colorwheel::WheelDelegate,
    R: SectionRenderer<Surface = Context, Error = cairo::Error>,
{
    let center = wheel.center();
    for section in wheel.sections() {
        renderer.draw_section(cr, center, section)?;
    }

    if let Some(section) = wheel.current_section() {
        draw_highlight(cr, center, section, colors)?;
    }

    let reach = wheel
        .sections()
        .iter()
        .map(|s| s.radius)
        .fold(0.0, f64::max);
    draw_selector(cr, center, wheel.rotation(), reach, colors)?;
    draw_hub(cr, center, wheel.config().dead_zone_radius, colors)
}

fn draw_highlight(
    cr: &Context,
    center: Point,
    section: &Section,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    let (r, g, b, a) = colors.highlight.into_components();
    let start = section.start_angle;
    let end = start + section.span();
    let radius = section.radius - HIGHLIGHT_WIDTH / 2.0;

    cr.set_source_rgba(r, g, b, a);
    cr.set_line_width(HIGHLIGHT_WIDTH);
    cr.new_path();
    cr.arc(center.x, center.y, radius, start, end);
    cr.stroke()
}

/// The needle points at the current rotation; the section under it is the selection.
fn draw_selector(
    cr: &Context,
    center: Point,
    rotation: f64,
    reach: f64,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    let (r, g, b, a) = colors.selector.into_components();
    let tip = Point::new(
        center.x + reach * rotation.cos(),
        center.y + reach * rotation.sin(),
    );

    cr.set_source_rgba(r, g, b, a);
    cr.set_line_width(NEEDLE_WIDTH);
    cr.new_path();
    cr.move_to(center.x, center.y);
    cr.line_to(tip.x, tip.y);
    cr.stroke()?;

    cr.new_path();
    cr.arc(tip.x, tip.y, NEEDLE_TIP_RADIUS, 0.0, TAU);
    cr.fill()
}

fn draw_hub(
    cr: &Context,
    center: Point,
    radius: f64,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    if radius <= 0.0 {
        return Ok(());
    }
    let (r, g, b, a) = colors.hub.into_components();
    cr.set_source_rgba(r, g, b, a);
    cr.new_path();
    cr.arc(center.x, center.y, radius, 0.0, TAU);
    cr.fill()
}
