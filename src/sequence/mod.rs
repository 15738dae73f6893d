pub(crate) mod director;
pub(crate) mod player;
pub(crate) mod step;
pub(crate) mod templates;
pub(crate) mod text_morph;
pub(crate) mod timeline;
