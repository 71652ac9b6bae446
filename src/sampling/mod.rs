pub(crate) mod point;
pub(crate) mod sampler;
