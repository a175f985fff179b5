pub mod editor;
pub mod gesture;
pub mod input;
pub mod interaction;
pub mod session;
pub mod shortcuts;

pub use editor::{ActionError, Editor, EditorAction, Level, Outcome, OutcomeCode};
pub use input::{Channel, InputEvent};
pub use interaction::Interaction;
