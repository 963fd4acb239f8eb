//! Shotframe Compositor
//!
//! Places screenshots inside a decorative frame for store listings.
//!
//! # Pipeline
//!
//! ```text
//! screenshots/**/*.png ── decode ── center + round corners ──┐
//!                                                            ├── frame over ── output/<name>.png
//! frame.png ── decode (once) ────────────────────────────────┘
//! ```

pub mod batch;
pub mod compositor;
pub mod io;

pub use batch::*;
pub use compositor::*;
