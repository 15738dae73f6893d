pub(crate) mod ease;
pub(crate) mod lerp;
pub(crate) mod property;
pub(crate) mod stage;
