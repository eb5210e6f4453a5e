//! The conversation editor: a pure, IPC-driven state machine over one loaded
//! memory transcript. No I/O lives here — commands feed it server data and
//! read snapshots back out.

pub mod message;
pub mod session;

pub use message::{ChatMessage, Role};
pub use session::{EditorSession, EditorSnapshot, ViewMode, PAGE_SIZE};
