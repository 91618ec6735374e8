//! Minimal fixed-rate terminal runtime.
//!
//! [`Runtime::run`] owns the terminal and feeds an [`App`] three kinds of
//! events: gravity ticks at the configured rate, redraws after anything
//! changed, and crossterm input.

pub use self::{app::App, runtime::Runtime};

mod app;
mod event;
mod event_loop;
mod runtime;
