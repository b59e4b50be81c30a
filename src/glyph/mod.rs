pub(crate) mod activity;
#[allow(clippy::module_inception)]
pub(crate) mod glyph;
pub(crate) mod role;
pub(crate) mod visibility;
