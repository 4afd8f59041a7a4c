//! `gn-sched`: admission-controlled path request scheduling.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`request`]   | `RequestState` lifecycle, `PathRequest`                   |
//! | [`queue`]     | `RequestQueue`: FIFO with duplicate rejection             |
//! | [`scheduler`] | `RequestScheduler::process`, `TickReport`                 |
//! | [`error`]     | `SchedError`, `SchedResult<T>`                            |
//!
//! # Request lifecycle
//!
//! ```text
//! Absent ──enqueue──▶ Queued ──dequeue──▶ InFlight ──▶ Attached
//!    ▲                  │                     │
//!    └─────cancel───────┘                     └──────▶ Failed (destination reset)
//! ```
//!
//! `Attached` and `Failed` end the request; the agent may be enqueued again
//! whenever it next needs a path.

pub mod error;
pub mod queue;
pub mod request;
pub mod scheduler;

#[cfg(test)]
mod tests;

pub use error::{SchedError, SchedResult};
pub use queue::RequestQueue;
pub use request::{PathRequest, RequestState};
pub use scheduler::{RequestScheduler, TickReport};
