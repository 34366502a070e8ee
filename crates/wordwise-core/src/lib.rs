pub mod catalog;
pub mod feedback;
pub mod history;
pub mod selection;
pub mod session;
pub mod state;
pub mod types;
pub mod view;
