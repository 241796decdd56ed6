//! # menu_nav
//!
//! The navigation half of the gesture menu: commands, layouts, the cursor,
//! the debounce gate, hold-to-confirm, and the per-screen [`Navigator`] that
//! ties them together.
//!
//! Nothing here owns a thread or a clock.  Every call takes `now`, and the
//! navigator reports the next instant it needs to be woken at
//! ([`Navigator::next_deadline`]).  The `gesture_menu` crate provides the
//! single-writer thread that drives it.
//!
//! ## Command sources
//!
//! | Source | Produces | Gate |
//! |---|---|---|
//! | Pointing gesture | Up / Down / Left / Right | debounce cooldown |
//! | Palm gesture held 1 s | Back (left) / Confirm (right) | hold-to-confirm |
//! | Wrist swipe (opt-in) | Back / Confirm | skipped while cooling down |
//! | Secondary channel code 1–4 | Right / Up / Left / Down | debounce cooldown |
//! | Secondary channel "finished" | Confirm | none |

pub mod command;
pub mod layout;
pub mod cursor;
pub mod debounce;
pub mod hold;
pub mod channel;
pub mod navigator;
pub mod config;

pub use command::{intent, Intent, NavCommand};
pub use layout::{LayoutError, LayoutKind, NavLayout};
pub use cursor::{Cursor, Step};
pub use debounce::DebounceGate;
pub use hold::{HoldToConfirm, HOLD_TO_CONFIRM};
pub use channel::{decode, ChannelError, ChannelSignal, CommandChannel};
pub use navigator::{NavEvent, NavSettings, Navigator};
pub use config::{ChannelConfig, ConfigError, NavConfig, ScreenConfig, ScreenLayout};
