/// Commands sent from input sources (hotkey, tray menu) to the main application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// Start a recording if none is active, otherwise stop it.
    ToggleRecording,
    /// Request application shutdown.
    Shutdown,
}
