//! Inbound adapters translating external requests into port calls while
//! keeping framework details at the edge.
//!
//! HTTP is the only transport; handlers live under [`http`].

pub mod http;
