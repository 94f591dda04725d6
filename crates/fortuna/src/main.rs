use fortuna::config;
use fortuna::gui::app::AppModel;
use fortuna::sys::runtime;
use fortuna_core::Wheel;
use relm4::prelude::*;

fn main() {
    env_logger::init();

    let config = config::load_or_default();
    let wheel = Wheel::new(&config);

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx.clone());

    let app = RelmApp::new("org.fortuna.wheel");

    app.run::<AppModel>((wheel, rx));
}
