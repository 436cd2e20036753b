//! Communication link and control mode traits

/// CAN link as seen from the service task
pub trait CommLink {
    /// Whether a control message arrived recently
    ///
    /// Called once per service period. May consume a "received" flag, hence
    /// `&mut self`.
    fn control_signal_valid(&mut self) -> bool;

    /// Send the periodic status frame
    fn transmit_status(&mut self, counter: u32);
}

/// Control mode selector
pub trait ModeControl {
    /// Whether the active mode takes its setpoint from the link
    fn feedback_enabled(&self) -> bool;

    /// Switch to the zero-torque mode after link loss
    fn force_soft_torque_off(&mut self);
}
