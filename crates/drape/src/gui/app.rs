use crate::gui::materials::{self, MaterialRow};
use crate::gui::theme::{self, ThemeColors};
use crate::gui::wheel::{self, CANVAS_SIZE, SWATCH_HEIGHT, SWATCH_WIDTH};
use crate::sys::watcher::ConfigWatcher;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use swatch::color::HexColor;
use swatch::config::{self, Config};
use swatch::flow::{EntryForm, Navigator, NavigationError, RecommendationStatus};
use swatch::geometry::Point;
use swatch::material::{self, MaterialName};
use swatch::pending::{self, Completion, DelayedTask};
use swatch::picker::ColorPicker;
use swatch::profile::SkinTone;

const SKIN_TONE_PLACEHOLDER: &str = "Select your skin tone...";
const RESULT_SWATCH_SIZE: i32 = 30;

fn skin_tone_labels() -> Vec<&'static str> {
    std::iter::once(SKIN_TONE_PLACEHOLDER)
        .chain(SkinTone::all().iter().map(SkinTone::picker_label))
        .collect()
}

/// Dropdown position to tone; position 0 is the placeholder.
fn skin_tone_at(position: u32) -> Option<SkinTone> {
    let index = position.checked_sub(1)? as usize;
    SkinTone::all().get(index).copied()
}

pub struct AppModel {
    nav: Navigator,
    config: Config,
    /// Snapshot of the picker step read by the draw functions.
    scene: Rc<RefCell<ColorPicker>>,
    result_color: Rc<RefCell<HexColor>>,
    completion_tx: async_channel::Sender<Completion>,
    material_rows: Vec<MaterialRow>,
    wheel_area: gtk::DrawingArea,
    swatch_area: gtk::DrawingArea,
    result_swatch: gtk::DrawingArea,
    hex_entry: gtk::Entry,
    material_list: gtk::Box,
    height_entry: gtk::Entry,
    weight_entry: gtk::Entry,
    skin_tone_dropdown: gtk::DropDown,
}

#[derive(Debug)]
pub enum AppMsg {
    Start,
    Back,
    HeightChanged(String),
    WeightChanged(String),
    SkinToneSelected(u32),
    Continue,
    WheelTap(Point),
    HexChanged(String),
    MaterialSelected(MaterialName),
    Recommend,
    RecommendationReady(Completion),
    ConfigReload,
}

impl AppModel {
    fn can_continue(&self) -> bool {
        self.nav.entry().is_some_and(EntryForm::is_complete)
    }

    fn selected_material(&self) -> Option<&MaterialName> {
        self.nav.picker().and_then(ColorPicker::material)
    }

    fn material_caption(&self) -> String {
        self.selected_material()
            .map(|name| format!("Selected Material: {name}"))
            .unwrap_or_default()
    }

    fn is_loading(&self) -> bool {
        self.nav
            .result()
            .is_some_and(|r| matches!(r.status, RecommendationStatus::Loading(_)))
    }

    fn recommendation_text(&self) -> String {
        match self.nav.result().map(|r| &r.status) {
            Some(RecommendationStatus::Ready(text)) => text.clone(),
            _ => String::new(),
        }
    }

    fn profile_text(&self) -> String {
        self.nav
            .result()
            .map(|r| {
                r.params
                    .profile_rows()
                    .into_iter()
                    .map(|(label, value)| format!("{label}: {value}"))
                    .collect::<Vec<_>>()
                    .join("\n")
            })
            .unwrap_or_default()
    }

    /// Copies the picker step into the shared scene and redraws what depends on it.
    fn sync_picker(&self) {
        if let Some(picker) = self.nav.picker() {
            *self.scene.borrow_mut() = picker.clone();
            materials::mark_selected(&self.material_rows, picker.material());
        }
        self.wheel_area.queue_draw();
        self.swatch_area.queue_draw();
    }

    /// Mirrors the picker's hex text into the entry. Skipped when equal so typing is not disturbed.
    fn sync_hex_entry(&self) {
        if let Some(picker) = self.nav.picker()
            && self.hex_entry.text().as_str() != picker.hex_text()
        {
            self.hex_entry.set_text(picker.hex_text());
        }
    }

    /// A fresh entry step starts blank; the change handlers clear the form to match.
    fn clear_entry_widgets(&self) {
        self.height_entry.set_text("");
        self.weight_entry.set_text("");
        self.skin_tone_dropdown.set_selected(0);
    }

    fn rebuild_materials(&mut self, sender: &ComponentSender<Self>) {
        let sender = sender.clone();
        self.material_rows = materials::populate(
            &self.material_list,
            &material::current(),
            move |name| sender.input(AppMsg::MaterialSelected(name)),
        );
        materials::mark_selected(&self.material_rows, self.selected_material());
    }

    fn recommend(&mut self) -> Result<(), NavigationError> {
        let (ticket, params) = self.nav.recommend()?;

        if let Ok(color) = HexColor::parse(&params.color_hex) {
            *self.result_color.borrow_mut() = color;
        }
        self.result_swatch.queue_draw();

        let handle = relm4::spawn(pending::deliver_after(
            self.config.recommendation_delay(),
            ticket,
            params,
            self.completion_tx.clone(),
        ));
        self.nav.attach_task(DelayedTask::new(ticket, handle));
        Ok(())
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = Config;
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Drape"),
            set_default_width: 420,
            set_default_height: 860,

            #[name = "stack"]
            gtk::Stack {
                set_transition_type: gtk::StackTransitionType::SlideLeftRight,
                #[watch]
                set_visible_child_name: &model.nav.route().to_string(),

                add_named[Some("Landing")] = &gtk::Box {
                    set_orientation: gtk::Orientation::Vertical,
                    set_valign: gtk::Align::Center,
                    set_halign: gtk::Align::Center,
                    set_spacing: 30,

                    gtk::Label {
                        set_label: "Welcome",
                        add_css_class: "drape-welcome",
                    },

                    gtk::Button {
                        set_label: "Get Started",
                        add_css_class: "drape-primary",
                        connect_clicked[sender] => move |_| {
                            sender.input(AppMsg::Start);
                        }
                    },
                },

                add_named[Some("Entry")] = &gtk::Box {
                    set_orientation: gtk::Orientation::Vertical,
                    set_valign: gtk::Align::Center,
                    set_halign: gtk::Align::Center,
                    set_width_request: 300,
                    set_spacing: 20,
                    set_margin_all: 20,

                    gtk::Label {
                        set_label: "Enter Your Details",
                        add_css_class: "drape-title",
                    },

                    gtk::Box {
                        set_orientation: gtk::Orientation::Horizontal,
                        set_spacing: 10,

                        #[name = "height_entry"]
                        gtk::Entry {
                            set_hexpand: true,
                            set_placeholder_text: Some("Height in centimeters"),
                            set_input_purpose: gtk::InputPurpose::Number,
                            connect_changed[sender] => move |entry| {
                                sender.input(AppMsg::HeightChanged(entry.text().to_string()));
                            }
                        },
                        gtk::Label {
                            set_label: "cm",
                        },
                    },

                    gtk::Box {
                        set_orientation: gtk::Orientation::Horizontal,
                        set_spacing: 10,

                        #[name = "weight_entry"]
                        gtk::Entry {
                            set_hexpand: true,
                            set_placeholder_text: Some("Weight in kilograms"),
                            set_input_purpose: gtk::InputPurpose::Number,
                            connect_changed[sender] => move |entry| {
                                sender.input(AppMsg::WeightChanged(entry.text().to_string()));
                            }
                        },
                        gtk::Label {
                            set_label: "kg",
                        },
                    },

                    gtk::Label {
                        set_label: "Skin Tone",
                        set_halign: gtk::Align::Start,
                    },

                    #[name = "skin_tone_dropdown"]
                    gtk::DropDown::from_strings(&skin_tone_labels()) {
                        connect_selected_notify[sender] => move |dropdown| {
                            sender.input(AppMsg::SkinToneSelected(dropdown.selected()));
                        }
                    },

                    gtk::Button {
                        set_label: "Continue",
                        add_css_class: "drape-primary",
                        #[watch]
                        set_sensitive: model.can_continue(),
                        connect_clicked[sender] => move |_| {
                            sender.input(AppMsg::Continue);
                        }
                    },

                    gtk::Button {
                        set_label: "Back",
                        add_css_class: "flat",
                        connect_clicked[sender] => move |_| {
                            sender.input(AppMsg::Back);
                        }
                    },
                },

                add_named[Some("Picker")] = &gtk::ScrolledWindow {
                    set_hscrollbar_policy: gtk::PolicyType::Never,

                    gtk::Box {
                        set_orientation: gtk::Orientation::Vertical,
                        set_spacing: 20,
                        set_margin_all: 20,

                        gtk::Label {
                            set_label: "Pick the shade you wish to wear",
                            add_css_class: "drape-title",
                            set_wrap: true,
                        },

                        #[name = "wheel_area"]
                        gtk::DrawingArea {
                            set_content_width: CANVAS_SIZE,
                            set_content_height: CANVAS_SIZE,
                            set_halign: gtk::Align::Center,

                            add_controller = gtk::GestureClick {
                                connect_pressed[sender] => move |_, _, x, y| {
                                    sender.input(AppMsg::WheelTap(Point::new(x, y)));
                                }
                            }
                        },

                        #[name = "swatch_area"]
                        gtk::DrawingArea {
                            set_content_width: SWATCH_WIDTH,
                            set_content_height: SWATCH_HEIGHT,
                            set_halign: gtk::Align::Center,
                        },

                        #[name = "hex_entry"]
                        gtk::Entry {
                            set_halign: gtk::Align::Center,
                            set_max_length: 7,
                            set_text: "#FF0000",
                            set_placeholder_text: Some("#RRGGBB"),
                            add_css_class: "drape-hex",
                            connect_changed[sender] => move |entry| {
                                sender.input(AppMsg::HexChanged(entry.text().to_string()));
                            }
                        },

                        gtk::Label {
                            set_label: "Materials & Textures",
                            add_css_class: "drape-title",
                        },

                        #[name = "material_list"]
                        gtk::Box {
                            set_orientation: gtk::Orientation::Vertical,
                            set_spacing: 12,
                        },

                        gtk::Label {
                            #[watch]
                            set_label: &model.material_caption(),
                            #[watch]
                            set_visible: model.selected_material().is_some(),
                        },

                        gtk::Button {
                            set_label: "Recommend",
                            add_css_class: "drape-primary",
                            connect_clicked[sender] => move |_| {
                                sender.input(AppMsg::Recommend);
                            }
                        },

                        gtk::Button {
                            set_label: "Back",
                            add_css_class: "flat",
                            connect_clicked[sender] => move |_| {
                                sender.input(AppMsg::Back);
                            }
                        },
                    },
                },

                add_named[Some("Result")] = &gtk::ScrolledWindow {
                    set_hscrollbar_policy: gtk::PolicyType::Never,

                    gtk::Box {
                        set_orientation: gtk::Orientation::Vertical,
                        set_spacing: 20,
                        set_margin_all: 20,

                        gtk::Label {
                            set_label: "Your Style Guide",
                            add_css_class: "drape-title",
                        },

                        gtk::Box {
                            set_orientation: gtk::Orientation::Vertical,
                            set_spacing: 10,
                            add_css_class: "drape-card",

                            gtk::Label {
                                set_label: "Your Profile",
                                set_halign: gtk::Align::Start,
                                add_css_class: "heading",
                            },

                            gtk::Label {
                                set_halign: gtk::Align::Start,
                                #[watch]
                                set_label: &model.profile_text(),
                            },

                            #[name = "result_swatch"]
                            gtk::DrawingArea {
                                set_content_width: RESULT_SWATCH_SIZE,
                                set_content_height: RESULT_SWATCH_SIZE,
                                set_halign: gtk::Align::Start,
                            },
                        },

                        gtk::Box {
                            set_orientation: gtk::Orientation::Vertical,
                            set_spacing: 20,
                            #[watch]
                            set_visible: model.is_loading(),

                            gtk::Spinner {
                                #[watch]
                                set_spinning: model.is_loading(),
                            },

                            gtk::Label {
                                set_label: "Creating your style guide...",
                            },
                        },

                        gtk::Label {
                            add_css_class: "drape-card",
                            set_wrap: true,
                            set_xalign: 0.0,
                            set_selectable: true,
                            #[watch]
                            set_visible: !model.is_loading(),
                            #[watch]
                            set_label: &model.recommendation_text(),
                        },

                        gtk::Button {
                            set_label: "Try Different Options",
                            add_css_class: "drape-primary",
                            connect_clicked[sender] => move |_| {
                                sender.input(AppMsg::Back);
                            }
                        },
                    },
                },
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let config = init;

        theme::load_css();

        let (completion_tx, completion_rx) = async_channel::unbounded();
        let picker = ColorPicker::new(config.wheel.clone());
        let result_color = picker.current_color();

        let model = AppModel {
            nav: Navigator::new(config.wheel.clone()),
            config,
            scene: Rc::new(RefCell::new(picker)),
            result_color: Rc::new(RefCell::new(result_color)),
            completion_tx,
            material_rows: Vec::new(),
            wheel_area: gtk::DrawingArea::default(),
            swatch_area: gtk::DrawingArea::default(),
            result_swatch: gtk::DrawingArea::default(),
            hex_entry: gtk::Entry::default(),
            material_list: gtk::Box::default(),
            height_entry: gtk::Entry::default(),
            weight_entry: gtk::Entry::default(),
            skin_tone_dropdown: gtk::DropDown::from_strings(&[]),
        };

        let widgets = view_output!();

        let mut model = model;
        model.wheel_area = widgets.wheel_area.clone();
        model.swatch_area = widgets.swatch_area.clone();
        model.result_swatch = widgets.result_swatch.clone();
        model.hex_entry = widgets.hex_entry.clone();
        model.material_list = widgets.material_list.clone();
        model.height_entry = widgets.height_entry.clone();
        model.weight_entry = widgets.weight_entry.clone();
        model.skin_tone_dropdown = widgets.skin_tone_dropdown.clone();

        let scene = model.scene.clone();
        widgets
            .wheel_area
            .set_draw_func(move |area, cr, _, _| {
                let colors = ThemeColors::from_context(&area.style_context());
                if let Err(e) = wheel::draw(cr, &scene.borrow(), &colors) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let scene = model.scene.clone();
        widgets
            .swatch_area
            .set_draw_func(move |area, cr, width, height| {
                let colors = ThemeColors::from_context(&area.style_context());
                let color = scene.borrow().current_color();
                if let Err(e) =
                    wheel::draw_swatch(cr, color, width as f64, height as f64, &colors)
                {
                    log::error!("Drawing error: {}", e);
                }
            });

        let result_color = model.result_color.clone();
        widgets
            .result_swatch
            .set_draw_func(move |area, cr, width, height| {
                let colors = ThemeColors::from_context(&area.style_context());
                let color = *result_color.borrow();
                if let Err(e) =
                    wheel::draw_swatch(cr, color, width as f64, height as f64, &colors)
                {
                    log::error!("Drawing error: {}", e);
                }
            });

        model.rebuild_materials(&sender);

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            let mut watcher = match ConfigWatcher::for_user_config() {
                Ok(w) => w,
                Err(e) => {
                    log::error!("Config reload disabled: {}", e);
                    return;
                }
            };
            while watcher.changed().await.is_some() {
                sender_clone.input(AppMsg::ConfigReload);
            }
        });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(completion) = completion_rx.recv().await {
                sender_clone.input(AppMsg::RecommendationReady(completion));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Start => match self.nav.start() {
                Ok(()) => self.clear_entry_widgets(),
                Err(e) => log::warn!("Cannot start: {}", e),
            },
            AppMsg::Back => {
                // leaving the result step drops its pending recommendation
                if let Err(e) = self.nav.back() {
                    log::warn!("Cannot go back: {}", e);
                }
                self.sync_picker();
            }
            AppMsg::HeightChanged(text) => {
                if let Some(form) = self.nav.entry_mut() {
                    form.height = text;
                }
            }
            AppMsg::WeightChanged(text) => {
                if let Some(form) = self.nav.entry_mut() {
                    form.weight = text;
                }
            }
            AppMsg::SkinToneSelected(position) => {
                if let Some(form) = self.nav.entry_mut() {
                    form.skin_tone = skin_tone_at(position);
                }
            }
            AppMsg::Continue => match self.nav.continue_to_picker() {
                Ok(()) => {
                    self.sync_hex_entry();
                    self.sync_picker();
                }
                Err(e) => log::warn!("Cannot continue: {}", e),
            },
            AppMsg::WheelTap(point) => {
                if self.nav.picker_mut().is_some_and(|p| p.on_tap(point)) {
                    self.sync_hex_entry();
                    self.sync_picker();
                }
            }
            AppMsg::HexChanged(text) => {
                if self
                    .nav
                    .picker_mut()
                    .is_some_and(|p| p.on_hex_text_change(text))
                {
                    self.sync_picker();
                }
            }
            AppMsg::MaterialSelected(name) => {
                if let Some(picker) = self.nav.picker_mut() {
                    picker.select_material(name);
                }
                self.sync_picker();
            }
            AppMsg::Recommend => {
                if let Err(e) = self.recommend() {
                    log::warn!("Cannot recommend: {}", e);
                }
            }
            AppMsg::RecommendationReady(completion) => {
                self.nav.deliver(completion);
            }
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    material::install(new_config.catalog());
                    self.nav.set_layout(new_config.wheel.clone());
                    self.config = new_config;
                    self.rebuild_materials(&sender);
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
    }
}
