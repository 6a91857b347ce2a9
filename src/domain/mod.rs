//! Domain modules organized as vertical slices.
//!
//! Each sub-module contains:
//! - `mod.rs`: View models (parsed, business-logic-ready)
//! - `wire.rs`: Raw serde structs matching backend payloads
//! - `convert.rs`: `From` conversions with lenient parsing
//! - `validate.rs`: Local checks run before a request is sent (where needed)
//! - `client.rs`: Sub-client with HTTP methods and caching

pub mod account;
pub mod market;
pub mod otp;
pub mod payout;
pub mod position;
pub mod profile;
pub mod trade;
pub mod transaction;
