mod gallery;

use gpui::{
    px, size, App, AppContext as _, AnyView, Bounds, SharedString, Window, WindowBounds,
    WindowKind, WindowOptions,
};
use gpui_component::Root;
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

pub use gallery::{DemoConfig, DemoState, Gallery};

pub fn init(cx: &mut App) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,gpui_controls=debug"));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter)
        .init();

    gpui_controls::init(cx);
}

pub fn create_new_window<F, E>(title: &str, crate_view_fn: F, cx: &mut App)
where
    E: Into<AnyView>,
    F: FnOnce(&mut Window, &mut App) -> E + Send + 'static,
{
    let mut window_size = size(px(1200.0), px(860.0));
    if let Some(display) = cx.primary_display() {
        let display_size = display.bounds().size;
        window_size.width = window_size.width.min(display_size.width * 0.85);
        window_size.height = window_size.height.min(display_size.height * 0.85);
    }

    let window_bounds = Bounds::centered(None, window_size, cx);
    let title = SharedString::from(title.to_string());
    tracing::info!("open window {:?} at {:?}", title, window_size);

    cx.spawn(async move |cx| {
        let options = WindowOptions {
            window_bounds: Some(WindowBounds::Windowed(window_bounds)),
            window_min_size: Some(gpui::Size {
                width: px(640.),
                height: px(480.),
            }),
            kind: WindowKind::Normal,
            ..Default::default()
        };

        let window = cx.open_window(options, |window, cx| {
            let view: AnyView = crate_view_fn(window, cx).into();
            cx.new(|cx| Root::new(view, window, cx))
        })?;
        tracing::debug!("window {:?} ready", title);

        window.update(cx, |_, window, _| {
            window.activate_window();
            window.set_window_title(&title);
        })?;

        Ok::<_, anyhow::Error>(())
    })
    .detach();
}
