use async_channel::Sender;
use colorwheel::{Section, WheelDelegate};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Select(usize),
    Next,
    Previous,
    Settled(usize),
    ConfigReload,
}

/// Wheel delegate that posts settled selections back to the UI loop.
#[derive(Debug, Clone)]
pub struct SelectionForwarder(Sender<AppEvent>);

impl SelectionForwarder {
    pub fn new(tx: Sender<AppEvent>) -> Self {
        Self(tx)
    }
}

impl WheelDelegate for SelectionForwarder {
    fn on_section_changed(&mut self, section: &Section) {
        if let Err(e) = self.0.try_send(AppEvent::Settled(section.index)) {
            log::warn!("Dropped selection of section {}: {}", section.index, e);
        }
    }

    fn on_section_under_touch(&mut self, section: &Section) {
        log::trace!("Section {} under touch", section.index);
    }
}
