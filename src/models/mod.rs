pub mod export;
pub mod note;
pub mod notebook;
pub mod repository;
pub mod settings;
pub mod storage;

pub use export::{ExportFormat, export_note};
pub use note::{DEFAULT_NOTE_CONTENT, DEFAULT_NOTE_TITLE, Note};
pub use notebook::{DEFAULT_NOTEBOOK_ID, DEFAULT_NOTEBOOK_NAME, Notebook};
pub use repository::NoteRepository;
pub use settings::{Settings, Theme};
pub use storage::{StorageManager, StoreSnapshot};
