//! Courtside Protocol
//!
//! Shared types for the Courtside event gateway. Events are serialized as
//! JSON over a single persistent WebSocket.

pub mod client;
pub mod server;
pub mod types;

pub use client::ClientFrame;
pub use server::GatewayEvent;
pub use types::*;
