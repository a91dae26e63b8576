#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod common;
mod config;
mod deck;
mod game;
mod player;
#[cfg(feature = "std")]
mod controller;
#[cfg(feature = "std")]
mod logging;
#[cfg(feature = "std")]
pub mod session;
#[cfg(feature = "std")]
mod store;
#[cfg(feature = "std")]
mod surface;
#[cfg(feature = "std")]
mod ui;

pub use common::*;
pub use config::*;
pub use deck::*;
pub use game::*;
pub use player::*;
#[cfg(feature = "std")]
pub use controller::*;
#[cfg(feature = "std")]
pub use logging::{init_logging, init_logging_with, LOG_ENV};
#[cfg(feature = "std")]
pub use session::{Event, Session, SessionHandle};
#[cfg(feature = "std")]
pub use store::*;
#[cfg(feature = "std")]
pub use surface::*;
#[cfg(feature = "std")]
pub use ui::*;
