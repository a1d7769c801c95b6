//! Top-level message router. Each reducer claims the messages it owns and
//! returns whether it handled the message; unclaimed messages fall through
//! to the next reducer.

use tracing::debug;

use crate::messages::{Command, Message};
use crate::reducers;
use crate::state::EditorState;

/// Apply one message to the editor state, collecting the side effects it
/// requests. Returns false if no reducer claimed the message.
pub fn update(state: &mut EditorState, msg: &Message, cmds: &mut Vec<Command>) -> bool {
    let handled = reducers::sync::update(state, msg, cmds)
        || reducers::graph::update(state, msg, cmds)
        || reducers::wizard::update(state, msg, cmds)
        || reducers::credentials::update(state, msg, cmds);
    if !handled {
        debug!(?msg, "message not claimed by any reducer");
    }
    handled
}
