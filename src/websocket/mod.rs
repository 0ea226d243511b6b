//! WebSocket Dashboard Sessions
//!
//! Each connection is one dashboard session: it owns its input state and
//! receives only the view nodes affected by its own input changes.
//!
//! ## Architecture
//!
//! - **SessionHub**: Tracks live sessions and enforces the session limit
//! - **Handler**: Handles WebSocket upgrade and per-session dispatch
//! - **Messages**: Defines client and server message formats
//!
//! ## Example
//!
//! ```javascript
//! // Browser
//! const ws = new WebSocket('ws://localhost:5010/ws');
//!
//! ws.onopen = () => {
//!   ws.send(JSON.stringify({type: 'select_country', value: 'Norway'}));
//! };
//!
//! ws.onmessage = (event) => {
//!   const msg = JSON.parse(event.data);
//!   if (msg.type === 'update') msg.outputs.forEach(render);
//! };
//! ```

mod handler;
mod hub;
mod messages;

pub use handler::websocket_handler;
pub use hub::{HubConfig, HubError, SessionHub, SessionId};
pub use messages::{ClientMessage, ServerMessage};
