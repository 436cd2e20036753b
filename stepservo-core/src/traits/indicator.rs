//! Error indicator trait

/// Error LED
pub trait ErrorIndicator {
    fn set_error(&mut self, on: bool);
}
