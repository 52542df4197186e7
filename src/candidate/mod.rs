//! Peak extraction from correlation surfaces.

pub(crate) mod peak;
