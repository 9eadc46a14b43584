pub mod contributions;
pub mod reveal;
pub mod selector;
pub mod theme;
pub mod typing;

pub use reveal::{RevealPhase, RevealTracker};
pub use selector::{select_projects, ProjectSelection, ProjectSource};
