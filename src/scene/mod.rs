pub(crate) mod behaviors;
pub(crate) mod config;
pub(crate) mod delegate;
pub(crate) mod events;
pub(crate) mod listeners;
pub(crate) mod orchestrator;
pub(crate) mod surface;

