use gpui::*;
use gpui_component::Root;
use tracing_subscriber::EnvFilter;

use aura::app::{AuraApp, Quit, ToggleSidebar, WINDOW_HEIGHT, WINDOW_WIDTH};
use aura::services::AppServices;
use aura_core::AppConfig;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::load();
    let window_title = SharedString::from(config.app_name.clone());
    let services = AppServices::from_config(config);

    let app = Application::new().with_assets(gpui_component_assets::Assets);

    app.run(move |cx| {
        gpui_tokio_bridge::init(cx);

        // Required before any Root is created.
        gpui_component::init(cx);

        cx.on_action(|_: &Quit, cx| {
            cx.quit();
        });
        cx.bind_keys([
            KeyBinding::new("cmd-q", Quit, None),
            KeyBinding::new("cmd-b", ToggleSidebar, None),
        ]);

        cx.spawn(async move |cx| {
            cx.update(|cx| {
                let options = WindowOptions {
                    window_bounds: Some(WindowBounds::Windowed(Bounds::centered(
                        None,
                        size(px(WINDOW_WIDTH), px(WINDOW_HEIGHT)),
                        cx,
                    ))),
                    titlebar: Some(TitlebarOptions {
                        title: Some(window_title),
                        ..Default::default()
                    }),
                    ..Default::default()
                };

                cx.open_window(options, |window, cx| {
                    let app = cx.new(|cx| AuraApp::new(services, window, cx));
                    cx.new(|cx| Root::new(app, window, cx))
                })
                .expect("failed to open main window");

                cx.activate(true);
            })
        })
        .detach();
    });
}
