pub(crate) mod measure;
pub(crate) mod palette;
pub(crate) mod scene;
pub(crate) mod surface;
pub(crate) mod svg;
