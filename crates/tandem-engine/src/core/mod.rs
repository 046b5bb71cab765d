//! Core engine-facing contracts.
//!
//! The stable interface between the runtime (platform loop) and the
//! application: a per-frame callback with a consistent context, and a
//! continue/exit directive back.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
