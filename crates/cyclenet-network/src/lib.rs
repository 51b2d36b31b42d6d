//! `cyclenet-network` — directed cycle-path network and shortest-path core.
//!
//! # What lives here
//!
//! | Module      | Contents                                              |
//! |-------------|--------------------------------------------------------|
//! | [`network`] | `Network`, `NetworkBuilder`, attribute vocabulary      |
//! | [`router`]  | `shortest_path`, `Route`                               |
//! | [`error`]   | `NetworkError`, `NetworkResult`                        |
//!
//! Composite edge-weight computation (`spec.md` §4.3 steps 1–4, which needs
//! a profile's attribute weight map) and route memoization live in
//! `cyclenet-sim`; this crate only owns the graph and the Dijkstra core.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                               |
//! |---------|-------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.    |

pub mod error;
pub mod network;
pub mod router;

#[cfg(test)]
mod tests;

pub use error::{NetworkError, NetworkResult};
pub use network::{Network, NetworkBuilder, LENGTH_ATTR};
pub use router::{shortest_path, Route};
