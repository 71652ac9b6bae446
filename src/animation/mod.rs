pub(crate) mod driver;
pub(crate) mod ease;
pub(crate) mod rng;
pub(crate) mod timeline;
