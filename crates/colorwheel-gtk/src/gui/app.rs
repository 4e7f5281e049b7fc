use crate::config::{self, HostConfig};
use crate::events::{AppEvent, SelectionForwarder};
use crate::gui::WHEEL_RADIUS_RATIO;
use crate::gui::theme::{self, ThemeColors};
use crate::gui::view::{self, ColorSectionRenderer};
use colorwheel::{EvenSections, Point, Size, WheelAction, WheelController, WheelEvent};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

pub type Wheel = WheelController<EvenSections, SelectionForwarder>;

pub struct AppInit {
    pub wheel: Wheel,
    pub config: HostConfig,
    pub sections_override: Option<usize>,
    pub rx: async_channel::Receiver<AppEvent>,
}

pub struct AppModel {
    pub wheel: Rc<RefCell<Wheel>>,
    pub renderer: Rc<RefCell<ColorSectionRenderer>>,
    pub config: HostConfig,
    pub sections_override: Option<usize>,
    pub status: String,
    pub root: gtk::ApplicationWindow,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    Wheel(WheelEvent),
    Select(usize),
    Next,
    Previous,
    Settled(usize),
    ConfigReload,
    Quit,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::Select(i) => AppMsg::Select(i),
            AppEvent::Next => AppMsg::Next,
            AppEvent::Previous => AppMsg::Previous,
            AppEvent::Settled(i) => AppMsg::Settled(i),
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

/// Data source for the configured layout, sized to leave a margin around the wheel.
pub fn layout_for(config: &HostConfig, sections_override: Option<usize>) -> EvenSections {
    let mut wheel = config.wheel.clone();
    if let Some(n) = sections_override {
        wheel.sections = n;
    }
    wheel.data_source().with_radius_ratio(WHEEL_RADIUS_RATIO)
}

fn status_text(index: Option<usize>, count: usize) -> String {
    match index {
        Some(i) => format!("Section {} of {}", i + 1, count),
        None => format!("{} sections, drag to select", count),
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = AppInit;
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Color Wheel"),
            set_default_size: (crate::gui::WINDOW_SIZE, crate::gui::WINDOW_SIZE),

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    let msg = if key == gtk::gdk::Key::Escape {
                        AppMsg::Quit
                    } else if key == gtk::gdk::Key::Left || key == gtk::gdk::Key::Up {
                        AppMsg::Previous
                    } else if key == gtk::gdk::Key::Right || key == gtk::gdk::Key::Down {
                        AppMsg::Next
                    } else {
                        return glib::Propagation::Proceed;
                    };
                    sender.input(msg);
                    glib::Propagation::Stop
                }
            },

            gtk::Box {
                set_orientation: gtk::Orientation::Vertical,

                #[name = "drawing_area"]
                gtk::DrawingArea {
                    set_hexpand: true,
                    set_vexpand: true,

                    connect_resize[sender] => move |_, width, height| {
                        let size = Size::new(width as f64, height as f64);
                        sender.input(AppMsg::Wheel(WheelEvent::BoundsChanged(size)));
                    },

                    add_controller = gtk::GestureDrag {
                        connect_drag_begin[sender] => move |_, x, y| {
                            sender.input(AppMsg::Wheel(WheelEvent::TouchDown(Point::new(x, y))));
                        },
                        connect_drag_update[sender] => move |gesture, dx, dy| {
                            if let Some((x, y)) = gesture.start_point() {
                                let point = Point::new(x + dx, y + dy);
                                sender.input(AppMsg::Wheel(WheelEvent::TouchMove(point)));
                            }
                        },
                        connect_drag_end[sender] => move |_, _, _| {
                            sender.input(AppMsg::Wheel(WheelEvent::TouchUp));
                        }
                    }
                },

                gtk::Label {
                    add_css_class: "colorwheel-status",
                    #[watch]
                    set_label: &model.status,
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let AppInit {
            wheel,
            config,
            sections_override,
            rx,
        } = init;

        theme::load_css();

        let status = status_text(wheel.current_index(), wheel.number_of_sections());
        let renderer = ColorSectionRenderer::new(&config.palette());

        let model = AppModel {
            wheel: Rc::new(RefCell::new(wheel)),
            renderer: Rc::new(RefCell::new(renderer)),
            config,
            sections_override,
            status,
            root: root.clone(),
            drawing_area: gtk::DrawingArea::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let wheel_draw = model.wheel.clone();
        let renderer_draw = model.renderer.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, _, _| {
                let style_context = drawing_area.style_context();
                let colors = ThemeColors::from_context(&style_context);
                if let Err(e) = view::draw(
                    cr,
                    &*wheel_draw.borrow(),
                    &*renderer_draw.borrow(),
                    &colors,
                ) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let wheel_tick = model.wheel.clone();
        let tick_sender = sender.clone();
        widgets.drawing_area.add_tick_callback(move |_, _| {
            if wheel_tick.borrow().is_animating() {
                tick_sender.input(AppMsg::Wheel(WheelEvent::Frame));
            }
            glib::ControlFlow::Continue
        });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        let duration = self.config.wheel.animation_duration();
        match msg {
            AppMsg::Wheel(event) => self.apply(event),
            AppMsg::Select(index) => self.apply(WheelEvent::SelectSection { index, duration }),
            AppMsg::Next => self.apply(WheelEvent::Next(duration)),
            AppMsg::Previous => self.apply(WheelEvent::Previous(duration)),
            AppMsg::Settled(index) => {
                log::info!("Selected section {}", index);
                self.status = status_text(Some(index), self.wheel.borrow().number_of_sections());
            }
            AppMsg::ConfigReload => self.reload_config(),
            AppMsg::Quit => self.root.close(),
        }
    }
}

impl AppModel {
    fn apply(&mut self, event: WheelEvent) {
        let result = self.wheel.borrow_mut().handle(event, Instant::now());
        match result {
            Ok(action) => self.react(action),
            Err(e) => log::warn!("Ignoring {:?}: {}", event, e),
        }
    }

    fn react(&mut self, action: WheelAction) {
        if action.section_changed {
            let wheel = self.wheel.borrow();
            self.status = status_text(wheel.current_index(), wheel.number_of_sections());
        }
        if action.should_redraw {
            self.drawing_area.queue_draw();
        }
    }

    fn reload_config(&mut self) {
        let new_config = match config::load_host_config() {
            Ok(c) => c,
            Err(e) => {
                log::error!("Failed to reload config: {}", e);
                return;
            }
        };

        let layout = layout_for(&new_config, self.sections_override);
        let result = {
            let mut wheel = self.wheel.borrow_mut();
            wheel.set_config(new_config.wheel.clone());
            if *wheel.data_source() == layout {
                Ok(WheelAction::new(true, false))
            } else {
                wheel.set_data_source(layout)
            }
        };

        match result {
            Ok(action) => {
                self.renderer.borrow_mut().set_palette(&new_config.palette());
                self.config = new_config;
                self.react(action);
                log::info!("Configuration reloaded");
            }
            Err(e) => log::error!("Reloaded config has an invalid layout: {}", e),
        }
    }
}
