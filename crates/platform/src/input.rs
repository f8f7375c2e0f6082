//! Event input management and key input.
//!
//! Key drivers publish into the event input manager, so the manager must be
//! running before any key driver registers with it.

/// Event input manager plus the GPIO key driver that feeds it.
pub trait EventInput {
    /// Start the event input manager (category dispatch).
    fn init_event_input(&mut self);

    /// Configure the GPIO keys and register them with the event input
    /// manager.
    fn init_key_gpio(&mut self);
}
