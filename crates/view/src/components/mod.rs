//! Generic shell components.
//!
//! Each one renders its own props first and then whatever feature modules
//! registered in the slot it owns.

mod account;
mod menu;
mod user;

pub use account::AccountView;
pub use menu::{MainMenu, MenuStyles};
pub use user::{UserMenuWidget, UserModal, display_name};
