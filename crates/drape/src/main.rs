use drape::gui::app::AppModel;
use relm4::prelude::*;
use swatch::config;
use swatch::material;

fn main() {
    env_logger::init();

    let config = config::load_or_default();
    material::install(config.catalog());

    RelmApp::new("org.drape.Drape").run::<AppModel>(config);
}
