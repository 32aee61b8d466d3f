use crate::{AppCommand, AppResult, TrayCommand, TraySink, TrayView, config::Config};

use noise_meter_core::{
    CpalLevelMonitor, CpalMicrophoneAccess, LoudnessLevel, MeterEvent, Permission, PermissionGate,
    Recorder, SessionController,
};
use tokio::sync::{mpsc, watch};
use tracing::{error, info, instrument, warn};
use tray_icon::menu::{MenuEvent, MenuId};

/// Main application state.
///
/// Runs on the async runtime thread and is the only owner of the session
/// controller. Hotkey presses, tray clicks and recorder callbacks all arrive
/// as channel messages and are applied one at a time. Tray updates go back
/// to the main thread through `tray` because `TrayIcon` is `!Send`.
pub struct App<R: Recorder, T: TraySink> {
    pub(crate) controller: SessionController<R>,
    pub(crate) events_tx: mpsc::Sender<MeterEvent>,
    pub(crate) events_rx: mpsc::Receiver<MeterEvent>,
    pub(crate) tray: T,
    pub(crate) config: Config,
    pub(crate) command_rx: mpsc::Receiver<AppCommand>,
    pub(crate) shutdown_tx: watch::Sender<bool>,
    pub(crate) toggle_menu_id: MenuId,
    pub(crate) exit_menu_id: MenuId,
    pub(crate) last_view: Option<TrayView>,
    pub(crate) monitor: Option<CpalLevelMonitor>,
    pub(crate) monitor_enabled: bool,
}

impl<R: Recorder, T: TraySink> App<R, T> {
    /// Run the main application event loop.
    #[instrument(skip(self))]
    pub(crate) async fn run(mut self) -> AppResult<()> {
        info!("Noise Meter starting");

        let permission = self.request_permission().await;
        self.controller.resolve_permission(permission);
        self.publish_view();

        // Idle metering is what lets loudness start a recording.
        self.monitor_enabled = self.config.audio.monitor_while_idle
            && self.config.behavior.auto_start
            && permission.is_granted();
        self.sync_monitor();

        // MenuEvent::receiver() is a crossbeam receiver with a blocking
        // recv(); one blocking task forwards it. It exits on the first failed
        // send once tray_event_rx is dropped.
        let (tray_event_tx, mut tray_event_rx) = mpsc::channel(32);
        let tray_handle = tokio::task::spawn_blocking(move || {
            let receiver = MenuEvent::receiver();
            while let Ok(event) = receiver.recv() {
                if tray_event_tx.blocking_send(event).is_err() {
                    break;
                }
            }
        });

        loop {
            tokio::select! {
                Some(event) = tray_event_rx.recv() => {
                    if !self.handle_tray_event(event) {
                        break;
                    }
                }

                Some(cmd) = self.command_rx.recv() => {
                    if !self.handle_command(cmd) {
                        break;
                    }
                }

                Some(event) = self.events_rx.recv() => {
                    self.handle_meter_event(event);
                }

                else => {
                    info!("All channels closed, shutting down");
                    break;
                }
            }
        }

        drop(tray_event_rx);

        self.monitor_enabled = false;
        self.sync_monitor();
        self.controller.stop();

        match tokio::time::timeout(std::time::Duration::from_secs(1), tray_handle).await {
            Ok(Ok(())) => info!("Tray event forwarder stopped cleanly"),
            Ok(Err(e)) => error!(error = ?e, "Tray event forwarder task panicked"),
            Err(_) => info!(
                "Tray event forwarder did not stop within timeout, \
                     will be cleaned up on exit"
            ),
        }

        let _ = self.shutdown_tx.send(true);
        self.tray.send_command(TrayCommand::Shutdown);
        info!("Noise Meter shut down successfully");

        Ok(())
    }

    /// Ask the host for microphone access once, off the async threads.
    async fn request_permission(&self) -> Permission {
        let access = CpalMicrophoneAccess::new(self.config.audio.selected_device.clone());

        match tokio::task::spawn_blocking(move || PermissionGate::new().initialize(&access)).await
        {
            Ok(permission) => permission,
            Err(e) => {
                error!(error = ?e, "Permission request task failed");
                Permission::Unknown
            }
        }
    }

    /// Whether the idle level monitor should be open right now.
    ///
    /// Closed while a session holds the input device.
    pub(crate) fn monitor_wanted(&self) -> bool {
        self.monitor_enabled && !self.controller.has_session()
    }

    /// Open or close the idle level monitor to match [`Self::monitor_wanted`].
    fn sync_monitor(&mut self) {
        match (self.monitor_wanted(), self.monitor.is_some()) {
            (true, false) => match self.start_monitor() {
                Ok(m) => self.monitor = Some(m),
                Err(e) => {
                    warn!(error = ?e, "Level monitor unavailable, auto-start disabled");
                    self.monitor_enabled = false;
                }
            },
            (false, true) => self.close_monitor(),
            _ => {}
        }
    }

    fn close_monitor(&mut self) {
        if let Some(mut m) = self.monitor.take() {
            m.stop();
        }
    }

    fn start_monitor(&self) -> AppResult<CpalLevelMonitor> {
        let monitor = CpalLevelMonitor::start(
            self.config.audio.selected_device.as_deref(),
            self.config.audio.update_interval(),
            self.events_tx.clone(),
        )?;
        Ok(monitor)
    }

    /// Apply a user command. Returns `false` when the loop should exit.
    #[instrument(skip(self))]
    pub(crate) fn handle_command(&mut self, cmd: AppCommand) -> bool {
        match cmd {
            AppCommand::ToggleRecording => {
                // Release the device before a start claims it.
                if !self.controller.has_session() {
                    self.close_monitor();
                }
                self.controller.toggle();
                self.sync_monitor();
                self.publish_view();
                true
            }
            AppCommand::Shutdown => {
                info!("Shutdown requested");
                false
            }
        }
    }

    /// Apply one recorder or monitor message.
    pub(crate) fn handle_meter_event(&mut self, event: MeterEvent) {
        // A level that will auto-start must free the device first.
        if let MeterEvent::AmbientLevel { metering } = event
            && self.controller.state().auto_start()
            && !self.controller.has_session()
            && LoudnessLevel::from_metering(metering).exceeds_auto_start_threshold()
        {
            self.close_monitor();
        }
        self.controller.handle_meter_event(event);
        self.sync_monitor();
        self.publish_view();
    }

    /// Handle tray menu events. Returns `false` when the loop should exit.
    #[instrument(skip(self))]
    pub(crate) fn handle_tray_event(&mut self, event: MenuEvent) -> bool {
        let event_id = &event.id;

        if *event_id == self.toggle_menu_id {
            return self.handle_command(AppCommand::ToggleRecording);
        }
        if *event_id == self.exit_menu_id {
            info!("Exit requested from tray menu");
            return self.handle_command(AppCommand::Shutdown);
        }

        true
    }

    /// Push the current view to the tray if it changed.
    pub(crate) fn publish_view(&mut self) {
        let view = TrayView::from_state(self.controller.state());
        if self.last_view == Some(view) {
            return;
        }

        if self.tray.send_command(TrayCommand::Render(view)) {
            self.last_view = Some(view);
        } else {
            warn!("Tray is gone, view not delivered");
        }
    }
}
