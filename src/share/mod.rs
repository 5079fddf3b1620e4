//! Shareable view state.
//!
//! The four view parameters (language, query, region, prefecture) live in a
//! [`ShareState`] that mirrors them into a URL fragment on every change, so
//! the current view can be reproduced from a link or QR code.
//!
//! ```
//! use gojoin::share::ShareState;
//!
//! let (mut state, warnings) = ShareState::from_fragment("#lang=en&q=castle");
//! assert!(warnings.is_empty());
//! state.set_query("himeji");
//! assert_eq!(state.fragment(), "lang=en&q=himeji");
//! ```

pub mod fragment;
mod params;
mod state;

pub use fragment::{decode, encode};
pub use params::ViewParams;
pub use state::ShareState;
