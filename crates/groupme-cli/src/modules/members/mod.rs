mod actions;
pub(crate) mod args;
pub(crate) mod render;

pub(crate) use actions::{handle_add, handle_invite, handle_remove, handle_rename, handle_users};
pub(crate) use render::print_json;
