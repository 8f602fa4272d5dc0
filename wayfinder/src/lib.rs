//! Place search and driving directions client core.
//!
//! Searches for places around a position, keeps the user's favorites,
//! fetches a driving route to a chosen place and decodes its polyline.
//! Sessions coordinate the asynchronous requests so that a slow response
//! to an old query can never replace what a newer query produced.

pub mod cache;
pub mod client;
pub mod connectivity;
pub mod domain;
pub mod polyline;
pub mod session;
pub mod store;
