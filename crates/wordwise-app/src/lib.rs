pub mod controller;
pub mod events;
pub mod io;
pub mod profile;
pub mod render;
pub mod shell;
pub mod state;
pub mod ui;
