pub(crate) mod profile;
pub(crate) mod reference;
pub(crate) mod text;
