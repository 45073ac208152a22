mod anchor;
mod common;
mod deficit;
mod focus;
mod transition;
