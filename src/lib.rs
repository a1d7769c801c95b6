//! Editor core for the workflow canvas: an in-memory workflow graph, the
//! wizard flow that builds it, a credential gate in front of third-party
//! actions, and a debounced auto-save loop that keeps the backend copy in
//! sync with local edits.
//!
//! The crate is headless. Rendering, routing, and auth live in the
//! embedding page; they reach the core through [`messages::Message`] and
//! are reached back through [`shell::Shell`] and [`network::BackendApi`].

pub mod autosave;
pub mod catalog;
pub mod command_executors;
pub mod constants;
pub mod credentials;
pub mod graph;
pub mod messages;
pub mod models;
pub mod network;
pub mod reducers;
pub mod session;
pub mod shell;
pub mod state;
pub mod update;
pub mod variables;
pub mod wizard;

pub use command_executors::EditorController;
pub use messages::{Command, Message};
pub use state::EditorState;

#[cfg(test)]
mod tests;
