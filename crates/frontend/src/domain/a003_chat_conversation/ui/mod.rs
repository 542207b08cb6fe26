//! Chat panel of the assistant (MVVM)
//!
//! - view_model.rs: ChatPanelVm, commands applied to the stored sessions
//! - sidebar.rs: conversation list
//! - view.rs: ChatPanel component

mod sidebar;
mod view;
mod view_model;

pub use view::ChatPanel;
pub use view_model::ChatPanelVm;
