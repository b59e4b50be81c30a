pub(crate) mod provider;
pub(crate) mod segments;
