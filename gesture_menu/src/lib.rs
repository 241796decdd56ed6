//! # gesture_menu
//!
//! Threaded runtime for the hand-gesture menu: one dispatch thread per
//! screen owns the [`menu_nav::Navigator`], frame sources and the secondary
//! channel poller feed it, and a minifb window shows the result.
//!
//! ## Threads per screen
//!
//! | Thread | Module | Posts |
//! |---|---|---|
//! | Frame source (sim or LeapMotion) | [`source`] | `Input::Frame` |
//! | Channel poller | [`poller`] | `Input::Channel` |
//! | Dispatcher | [`dispatcher`] | `NavEvent`s back to the screen |
//! | Window / main | [`app`] | `Input::Exit` on leave |
//!
//! ## Feature flags
//!
//! * (default) — **Simulation mode**: the keyboard stands in for the camera
//!   and for the secondary channel.
//! * `leap` — **Hardware mode**: hand frames come from a LeapMotion
//!   controller via LeapC.
//!
//! ### Simulation keyboard shortcuts
//!
//! | Key | Input |
//! |---|---|
//! | Arrows / hold | Pointing up / down / left / right |
//! | `Z` / hold | Open palm, fingers left (Back after 1 s) |
//! | `X` / hold | Open palm, fingers right (Confirm after 1 s) |
//! | `F` / hold | Fist (no gesture) |
//! | `A` / `D` | Wrist swipe left / right |
//! | `1`–`4` | Channel code: right, up, left, down |
//! | `Enter` | Channel "finished" |
//! | `Q` | Quit |

pub mod dispatcher;
pub mod poller;
pub mod source;
pub mod sim_channel;
pub mod session;
pub mod replay;
pub mod visualizer;
pub mod app;
