//! Core of a small task list app: a persistence-backed task store plus the
//! derived view state (tab filtering, overdue flags, empty-state flag).
//! Rendering is somebody else's problem; everything here is plain data and
//! runs without a UI.

pub mod storage;
pub mod store;
pub mod task;
pub mod view;

pub use storage::{FileStorage, MemoryStorage, Storage};
pub use store::{decode_tasks, CreateError, DecodeError, TaskStore, STORAGE_KEY};
pub use task::{ParsePriorityError, Priority, Task};
pub use view::{is_empty_state, is_overdue, visible_tasks, Tab};
