use crate::config::{self, Config};
use crate::events::AppEvent;
use crate::gui::canvas::CairoSurface;
use crate::gui::{theme, window};
use dotring::{IndicatorConfig, LoadingIndicator};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

pub struct AppModel {
    pub indicator: Rc<RefCell<LoadingIndicator>>,
    /// Set by the indicator's clocks, cleared by the frame tick that repaints.
    pub needs_redraw: Rc<Cell<bool>>,
    pub config: Config,
    pub window: gtk::ApplicationWindow,
    pub drawing_area: gtk::DrawingArea,
    /// Present only while the animation runs.
    pub ticker: Option<gtk::TickCallbackId>,
}

#[derive(Debug)]
pub enum AppMsg {
    Start,
    Stop,
    Restart,
    Resize(i32, i32),
    ConfigReload,
    Quit,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::Start => AppMsg::Start,
            AppEvent::Stop => AppMsg::Stop,
            AppEvent::Restart => AppMsg::Restart,
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

impl AppModel {
    fn resolve_colors(&self, config: &Config) -> IndicatorConfig {
        let mut resolved = config.indicator_config();
        if config.follow_theme {
            theme::apply_theme_colors(&self.drawing_area.style_context(), &mut resolved);
        }
        resolved
    }

    /// Frame-clock driven: advance by the time since the previous frame and
    /// repaint only when a clock reported a visible change.
    fn attach_ticker(&mut self) {
        if self.ticker.is_some() {
            return;
        }
        let indicator = self.indicator.clone();
        let redraw_flag = self.needs_redraw.clone();
        let id = self
            .drawing_area
            .add_tick_callback(move |area, frame_clock| {
                let micros = u64::try_from(frame_clock.frame_time()).unwrap_or(0);
                indicator
                    .borrow_mut()
                    .on_frame(Duration::from_micros(micros));
                if redraw_flag.replace(false) {
                    area.queue_draw();
                }
                glib::ControlFlow::Continue
            });
        self.ticker = Some(id);
    }

    fn detach_ticker(&mut self) {
        if let Some(id) = self.ticker.take() {
            id.remove();
        }
    }

    fn apply_window_size(&self, size: i32) {
        self.window.set_default_size(size, size);
        self.drawing_area.set_content_width(size);
        self.drawing_area.set_content_height(size);
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (Config, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("dotloader"),
            set_default_size: (model.config.window_size, model.config.window_size),
            add_css_class: "dotloader-window",
            set_decorated: false,

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::Escape {
                        sender.input(AppMsg::Quit);
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,
                set_content_width: model.config.window_size,
                set_content_height: model.config.window_size,
                add_css_class: "dotloader-drawing-area",

                connect_resize[sender] => move |_, width, height| {
                    sender.input(AppMsg::Resize(width, height));
                },
                connect_map[sender] => move |_| {
                    sender.input(AppMsg::Start);
                },
                connect_unmap[sender] => move |_| {
                    sender.input(AppMsg::Stop);
                },

                add_controller = gtk::GestureClick {
                    connect_released[sender] => move |_, _, _, _| {
                        sender.input(AppMsg::Restart);
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
        let (config, rx) = init;

        theme::load_css();
        window::init_layer_shell(&root);

        let needs_redraw = Rc::new(Cell::new(false));
        let flag = needs_redraw.clone();
        let indicator = LoadingIndicator::new(config.indicator_config(), move || flag.set(true));

        let model = AppModel {
            indicator: Rc::new(RefCell::new(indicator)),
            needs_redraw,
            config,
            window: root.clone(),
            drawing_area: gtk::DrawingArea::default(),
            ticker: None,
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        if model.config.follow_theme {
            let resolved = model.resolve_colors(&model.config);
            model.indicator.borrow_mut().configure(resolved);
        }

        let indicator_draw = model.indicator.clone();
        widgets
            .drawing_area
            .set_draw_func(move |_, cr, _, _| {
                let mut surface = CairoSurface::new(cr);
                if let Err(e) = indicator_draw.borrow().render(&mut surface) {
                    log::error!("Drawing error: {}", e);
                }
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
            AppMsg::Start => {
                self.indicator.borrow_mut().start();
                self.attach_ticker();
                self.drawing_area.queue_draw();
            }
            AppMsg::Stop => {
                self.indicator.borrow_mut().stop();
                self.detach_ticker();
                self.drawing_area.queue_draw();
            }
            AppMsg::Restart => {
                log::info!("Restarting animation");
                self.indicator.borrow_mut().start();
                self.attach_ticker();
                self.drawing_area.queue_draw();
            }
            AppMsg::Resize(width, height) => {
                self.indicator.borrow_mut().on_size_changed(width, height);
                self.drawing_area.queue_draw();
            }
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    let resolved = self.resolve_colors(&new_config);
                    self.indicator.borrow_mut().configure(resolved);
                    if let Some(size) = new_config.resized_from(&self.config) {
                        self.apply_window_size(size);
                    }
                    self.config = new_config;
                    self.drawing_area.queue_draw();
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
            AppMsg::Quit => {
                relm4::main_application().quit();
            }
        }
    }
}
