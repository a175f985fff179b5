pub mod config;
pub mod filter;
pub mod id;
pub mod model;
pub mod store;
pub mod transform;

pub use config::EditorConfig;
pub use filter::{FilteredView, ViewFilter};
pub use id::{EdgeId, NodeId};
pub use model::*;
pub use store::{DeletedNode, GraphStore};
pub use transform::{Camera, to_screen, to_world};
