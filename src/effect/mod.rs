pub(crate) mod config;
pub(crate) mod living;
pub(crate) mod state;
