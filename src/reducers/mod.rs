//! Reducers split by concern. Each returns `true` when it handled the
//! message; the top-level `update` tries them in order.

pub mod credentials;
pub mod graph;
pub mod sync;
pub mod wizard;
