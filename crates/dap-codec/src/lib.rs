//! dap-codec - Debug Adapter Protocol message schema
//!
//! A typed data-binding layer over the DAP wire format: envelope types, the
//! full request/response/event catalogue, and a strict JSON codec. Framing,
//! seq allocation, and request/response correlation belong to the transport
//! that carries these messages; nothing here does I/O.
//!
//! # Architecture
//!
//! Discriminants are derived, never stored: `RequestArguments`,
//! `ResponseBody`, and `EventBody` are sum types whose variant *is* the
//! `command`/`event` value, so a message cannot carry a discriminant that
//! disagrees with its payload, and the dispatch over the catalogue is an
//! exhaustive `match` checked at compile time.
//!
//! ```
//! use dap_codec::{ProtocolMessage, Request, RequestArguments, ContinueArguments};
//!
//! let request = ProtocolMessage::Request(Request::new(
//!     1,
//!     RequestArguments::Continue(ContinueArguments { thread_id: 3, single_thread: None }),
//! ));
//! let wire = request.to_wire().unwrap();
//! assert_eq!(ProtocolMessage::from_wire(&wire).unwrap(), request);
//! ```

pub mod error;
pub mod events;
pub mod message;
pub mod requests;
pub mod responses;
pub mod types;

pub use error::{Error, Result};
pub use events::*;
pub use message::{Event, ProtocolMessage, Request, Response, ResponseResult};
pub use requests::*;
pub use responses::*;
pub use types::*;
