use gpui::Application;
use gpui_component_assets::Assets;
use gpui_controls_story::{create_new_window, init, Gallery};

fn main() {
    let app = Application::new().with_assets(Assets);

    app.run(move |cx| {
        init(cx);
        cx.activate(true);

        create_new_window("GPUI Controls", Gallery::view, cx);
    });
}
