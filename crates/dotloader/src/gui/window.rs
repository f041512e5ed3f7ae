use gtk4 as gtk;
use gtk4_layer_shell::{Layer, LayerShell};

/// Floats the indicator above other windows when the compositor supports the
/// layer-shell protocol. Without anchors the compositor centers the surface.
pub fn init_layer_shell(window: &gtk::ApplicationWindow) -> bool {
    if !gtk4_layer_shell::is_supported() {
        log::warn!("Layer shell not supported, using a regular window");
        return false;
    }

    window.init_layer_shell();
    window.set_layer(Layer::Overlay);
    window.set_namespace(Some("dotloader"));
    window.set_exclusive_zone(-1);
    window.set_keyboard_mode(gtk4_layer_shell::KeyboardMode::OnDemand);
    true
}
