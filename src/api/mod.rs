//! Four layered entry points over [`crate::engine`], from path-only
//! convenience down to fully custom I/O. All four drive the same
//! `LoadSession`/`SaveSession` state machine underneath; they differ only in
//! which parameters each tier defaults versus exposes.
//!
//! | Tier | Adds | Defaults away |
//! |------|------|----------------|
//! | [`junior`] | `load_from_file`/`save_to_file` | codec choice, options, multi-frame |
//! | [`advanced`] | streaming session, memory sources, codec hint | explicit `LoadOptions`/`SaveOptions` |
//! | [`deep`] | explicit `LoadOptions`/`SaveOptions`, mandatory codec | custom I/O |
//! | [`technical`] | any caller-supplied [`crate::io::Stream`] | nothing — this is the engine itself |
//!
//! `junior`, `advanced`, and `deep` all open a [`crate::io::FileStream`] or
//! one of the memory streams internally and therefore require the `std`
//! feature; a `no_std` caller with a custom transport uses `technical`
//! (or drives [`crate::engine`] directly, which is what all four do).

#[cfg(feature = "std")]
pub mod advanced;
#[cfg(feature = "std")]
pub mod deep;
#[cfg(feature = "std")]
pub mod junior;
pub mod technical;
