use fortuna_core::config::Settings;
use gdk_pixbuf::Pixbuf;
use std::path::Path;

/// Decoded images drawn with the wheel: one that turns with it and one fixed on top.
#[derive(Default)]
pub struct WheelImages {
    pub image: Option<Pixbuf>,
    pub overlay: Option<Pixbuf>,
}

impl WheelImages {
    pub fn load(settings: &Settings) -> Self {
        Self {
            image: settings.image.as_deref().and_then(load_image),
            overlay: settings.overlay_image.as_deref().and_then(load_image),
        }
    }
}

fn load_image(path: &Path) -> Option<Pixbuf> {
    Pixbuf::from_file(path)
        .map_err(|e| log::error!("Failed to load image {}: {}", path.display(), e))
        .ok()
}
