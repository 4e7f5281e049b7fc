use crate::wheel::{Point, Section, Size};

/// Supplies the sections of a wheel for a given control size.
///
/// Implementations must return a non-empty list that tiles the full circle, ordered by
/// index. It is called once when the controller is built and again on every bounds change.
pub trait WheelDataSource {
    fn sections_for_size(&self, size: Size) -> Vec<Section>;
}

impl<F> WheelDataSource for F
where
    F: Fn(Size) -> Vec<Section>,
{
    fn sections_for_size(&self, size: Size) -> Vec<Section> {
        self(size)
    }
}

/// Receives selection changes. Every method is optional.
pub trait WheelDelegate {
    /// A section became the settled selection.
    ///
    /// Called at most once per settle, after the controller's state is consistent.
    fn on_section_changed(&mut self, _section: &Section) {}

    /// The section under the finger changed while dragging. Not a committed selection.
    fn on_section_under_touch(&mut self, _section: &Section) {}
}

/// The absent delegate.
impl WheelDelegate for () {}

/// Draws one section onto a host surface. The wheel core never calls this; the view
/// layer that owns both the controller and the surface does.
pub trait SectionRenderer {
    type Surface;
    type Error;

    fn draw_section(
        &self,
        surface: &Self::Surface,
        center: Point,
        section: &Section,
    ) -> Result<(), Self::Error>;
}
