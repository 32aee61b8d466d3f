use crate::TrayCommand;

use tao::event_loop::EventLoopProxy;

/// Destination for tray commands produced on the runtime thread.
///
/// The real sink is the tao event-loop proxy; anything that can carry a
/// [`TrayCommand`] back to the UI thread works.
pub trait TraySink {
    /// Deliver `cmd`. Returns `false` once the receiving side is gone.
    fn send_command(&self, cmd: TrayCommand) -> bool;
}

impl TraySink for EventLoopProxy<TrayCommand> {
    fn send_command(&self, cmd: TrayCommand) -> bool {
        self.send_event(cmd).is_ok()
    }
}

impl TraySink for std::sync::mpsc::Sender<TrayCommand> {
    fn send_command(&self, cmd: TrayCommand) -> bool {
        self.send(cmd).is_ok()
    }
}
