//! Wire types for the chat service.
//!
//! Two layers live here:
//! - [`frame`]: the `data: <json>` line frames of the streaming endpoint,
//! - [`messages`]: the JSON response types of the REST endpoints.

pub mod frame;
pub mod messages;

pub use frame::{parse_line, ChunkFrame, DataLine, ErrorFrame, Frame, SessionFrame, DATA_PREFIX};
pub use messages::{
    ChatReply, FileEntry, FileUploadReply, HealthStatus, SessionCreated, SessionDetails,
};
