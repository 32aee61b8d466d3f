//! Noise Meter: records from the microphone and shows loudness as a color.

mod app;
mod app_command;
mod config;
mod error;
mod hotkey_handler;
mod tray_command;
mod tray_icon_render;
mod tray_manager;
mod tray_sink;
mod tray_view;

pub(crate) use {
    app::App,
    app_command::AppCommand,
    error::{AppError, Result as AppResult},
    hotkey_handler::HotkeyHandler,
    tray_command::TrayCommand,
    tray_manager::TrayManager,
    tray_sink::TraySink,
    tray_view::{Glyph, TrayView},
};

use crate::config::Config;

use global_hotkey::GlobalHotKeyManager;
use noise_meter_core::{CpalRecorder, QualityPreset, SessionController};
use tao::{
    event::Event,
    event_loop::{ControlFlow, EventLoopBuilder},
};
use tokio::sync::{mpsc, watch};
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Capacity of the recorder-to-controller event channel.
const METER_EVENT_CAPACITY: usize = 64;

/// Application entry point.
fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("noise_meter=debug,noise_meter_core=debug"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let event_loop = EventLoopBuilder::<TrayCommand>::with_user_event().build();
    let tray_proxy = event_loop.create_proxy();

    // TrayManager lives on the main thread - TrayIcon is !Send on all platforms.
    let mut tray_manager = match TrayManager::new() {
        Ok(tm) => tm,
        Err(e) => {
            error!("Failed to create TrayManager: {:?}", e);
            std::process::exit(1);
        }
    };

    // Persists across event loop iterations — dropping it unregisters the hotkey.
    let mut hotkey_manager: Option<GlobalHotKeyManager> = None;

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::UserEvent(cmd) => {
                match cmd {
                    TrayCommand::Render(view) => {
                        if let Err(e) = tray_manager.update_view(view) {
                            error!(error = ?e, "Failed to update tray icon");
                        }
                    }
                    TrayCommand::Shutdown => {
                        *control_flow = ControlFlow::ExitWithCode(0);
                    }
                }
                return;
            }
            Event::NewEvents(tao::event::StartCause::Init) => {
                let config = match Config::load().and_then(|c| c.validate().map(|()| c)) {
                    Ok(c) => c,
                    Err(e) => {
                        error!("Failed to load config: {:?}", e);
                        std::process::exit(1);
                    }
                };

                #[cfg(target_os = "macos")]
                unsafe {
                    use core_foundation::runloop::{CFRunLoopGetMain, CFRunLoopWakeUp};
                    CFRunLoopWakeUp(CFRunLoopGetMain());
                }

                let (command_tx, command_rx) = mpsc::channel(32);
                let (events_tx, events_rx) = mpsc::channel(METER_EVENT_CAPACITY);
                let (shutdown_tx, shutdown_rx) = watch::channel(false);

                // Register hotkey on the main thread — tao's event loop pumps
                // the Windows messages needed for WM_HOTKEY delivery.
                let (manager, hotkey_id) = match HotkeyHandler::register_hotkey() {
                    Ok(pair) => pair,
                    Err(e) => {
                        error!("Failed to register hotkey: {:?}", e);
                        std::process::exit(1);
                    }
                };
                hotkey_manager = Some(manager);

                let tray_proxy = tray_proxy.clone();
                let toggle_menu_id = tray_manager.toggle_item_id().clone();
                let exit_menu_id = tray_manager.exit_item_id().clone();

                // Spawn tokio runtime on separate thread.
                // TrayManager and hotkey_manager stay on the main thread.
                std::thread::spawn(move || {
                    let rt = match tokio::runtime::Runtime::new() {
                        Ok(rt) => rt,
                        Err(e) => {
                            error!("Failed to create tokio runtime: {:?}", e);
                            std::process::exit(1);
                        }
                    };

                    rt.block_on(async {
                        let hotkey_handler = HotkeyHandler::new(hotkey_id, command_tx);

                        let recorder = CpalRecorder::new(
                            config.audio.selected_device.clone(),
                            config.audio.update_interval(),
                        );
                        let controller = SessionController::new(
                            recorder,
                            QualityPreset::High,
                            events_tx.clone(),
                            config.behavior.auto_start,
                        );

                        let app = App {
                            controller,
                            events_tx,
                            events_rx,
                            tray: tray_proxy,
                            config,
                            command_rx,
                            shutdown_tx,
                            toggle_menu_id,
                            exit_menu_id,
                            last_view: None,
                            monitor: None,
                            monitor_enabled: false,
                        };

                        // Own task so a press is forwarded even while the
                        // app loop is inside a synchronous recorder call.
                        let hotkey_task = tokio::spawn(async move {
                            if let Err(e) = hotkey_handler.run(shutdown_rx).await {
                                error!(error = ?e, "Hotkey handler error");
                            }
                        });

                        if let Err(e) = app.run().await {
                            error!(error = ?e, "App error");
                        }

                        if let Err(e) = hotkey_task.await {
                            error!(error = ?e, "Hotkey handler task panicked");
                        }
                    });
                });
            }
            _ => {}
        }

        // Keep hotkey_manager alive in the closure for the app's lifetime.
        let _ = &hotkey_manager;
    });
}
