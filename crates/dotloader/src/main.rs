use dotloader::config;
use dotloader::gui::app::AppModel;
use dotloader::sys::runtime;
use relm4::prelude::*;

fn main() {
    env_logger::init();

    if let Err(e) = config::write_default_config() {
        log::warn!("Could not write default config: {}", e);
    }
    let config = config::load_or_default();

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx);

    let app = RelmApp::new("org.dotring.dotloader");

    app.run::<AppModel>((config, rx));
}
