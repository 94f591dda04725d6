use crate::config;
use crate::events::AppEvent;
use crate::gui::images::WheelImages;
use crate::gui::theme::{self, ThemeColors};
use crate::gui::wheel_view;
use fortuna_core::{Point, Size, Wheel, WheelEvent};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

const TITLE: &str = "Fortuna";
/// Impulse for a keyboard spin (space / enter).
const KEY_SPIN_IMPULSE: f64 = 200.0;

pub struct AppModel {
    pub wheel: Rc<RefCell<Wheel>>,
    pub images: Rc<RefCell<WheelImages>>,
    pub title: String,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    PointerDown(Point),
    PointerMove(Point),
    PointerUp,
    Hover(Point),
    Spin(f64),
    Stop,
    Wheel(WheelEvent),
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::Spin(impulse) => AppMsg::Spin(impulse),
            AppEvent::Stop => AppMsg::Stop,
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

/// Milliseconds on the same monotonic clock GDK frame times use.
fn now_ms() -> f64 {
    glib::monotonic_time() as f64 / 1000.0
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (Wheel, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            #[watch]
            set_title: Some(&model.title),
            set_default_size: (640, 640),

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::space || key == gtk::gdk::Key::Return {
                        sender.input(AppMsg::Spin(KEY_SPIN_IMPULSE));
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,
                add_css_class: "fortuna-drawing-area",

                add_controller = gtk::EventControllerMotion {
                    connect_motion[sender] => move |_, x, y| {
                        sender.input(AppMsg::Hover(Point::new(x, y)));
                    }
                },

                add_controller = gtk::GestureDrag {
                    connect_drag_begin[sender] => move |_, x, y| {
                        sender.input(AppMsg::PointerDown(Point::new(x, y)));
                    },
                    connect_drag_update[sender] => move |gesture, dx, dy| {
                        if let Some((x, y)) = gesture.start_point() {
                            sender.input(AppMsg::PointerMove(Point::new(x + dx, y + dy)));
                        }
                    },
                    connect_drag_end[sender] => move |_, _, _| {
                        sender.input(AppMsg::PointerUp);
                    }
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (mut wheel, rx) = init;

        theme::load_css();

        let events = sender.clone();
        wheel.on_event(move |event| events.input(AppMsg::Wheel(event.clone())));

        let images = WheelImages::load(wheel.settings());

        let model = AppModel {
            wheel: Rc::new(RefCell::new(wheel)),
            images: Rc::new(RefCell::new(images)),
            title: TITLE.to_string(),
            drawing_area: gtk::DrawingArea::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let wheel_draw = model.wheel.clone();
        let images_draw = model.images.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, _, _| {
                let style_context = drawing_area.style_context();
                let colors = ThemeColors::from_context(&style_context);
                if let Err(e) =
                    wheel_view::draw(cr, &wheel_draw.borrow(), &images_draw.borrow(), &colors)
                {
                    log::error!("Drawing error: {}", e);
                }
            });

        let wheel_resize = model.wheel.clone();
        widgets.drawing_area.connect_resize(move |_, w, h| {
            wheel_resize
                .borrow_mut()
                .resize(Size::new(w as f64, h as f64));
        });

        // host driver: one physics tick per frame, redraw only while something moves
        let wheel_tick = model.wheel.clone();
        let last_rotation = Cell::new(f64::NAN);
        widgets
            .drawing_area
            .add_tick_callback(move |drawing_area, clock| {
                let frame = wheel_tick
                    .borrow_mut()
                    .advance(clock.frame_time() as f64 / 1000.0);
                if frame.rotation != last_rotation.get() || frame.velocity != 0.0 {
                    last_rotation.set(frame.rotation);
                    drawing_area.queue_draw();
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
        match msg {
            AppMsg::PointerDown(point) => {
                if self.wheel.borrow_mut().pointer_down(point) {
                    self.title = TITLE.to_string();
                }
            }
            AppMsg::PointerMove(point) => {
                self.wheel.borrow_mut().pointer_move(point, now_ms());
            }
            AppMsg::PointerUp => {
                self.wheel.borrow_mut().pointer_up(now_ms());
            }
            AppMsg::Hover(point) => {
                self.wheel.borrow_mut().pointer_hover(point);
            }
            AppMsg::Spin(impulse) => {
                self.title = TITLE.to_string();
                self.wheel.borrow_mut().spin(impulse);
            }
            AppMsg::Stop => {
                self.wheel.borrow_mut().stop();
            }
            AppMsg::Wheel(WheelEvent::Spin {
                direction,
                velocity,
                drag_samples,
            }) => {
                log::info!(
                    "Spinning {} at {:.1} deg/s (drag samples: {:?})",
                    direction,
                    velocity,
                    drag_samples
                );
            }
            AppMsg::Wheel(WheelEvent::Rest { item }) => {
                let wheel = self.wheel.borrow();
                match item.and_then(|i| wheel.item(i)) {
                    Some(winner) => {
                        log::info!("Wheel stopped on '{}'", winner.label);
                        self.title = format!("{} - {}", TITLE, winner.label);
                    }
                    None => log::info!("Wheel stopped with no items"),
                }
            }
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    self.wheel.borrow_mut().apply_config(&new_config);
                    *self.images.borrow_mut() = WheelImages::load(self.wheel.borrow().settings());
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }

        let cursor = self.wheel.borrow().cursor().to_string();
        self.drawing_area.set_cursor_from_name(Some(&cursor));
        self.drawing_area.queue_draw();
    }
}
