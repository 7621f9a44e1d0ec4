pub(crate) mod gateway;
pub(crate) mod groups;
pub(crate) mod members;
pub(crate) mod system;
