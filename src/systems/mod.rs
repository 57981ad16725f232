pub mod boundary;
pub mod collision;
pub mod placement;

pub use boundary::{resolve_walls, WallPolicy};
pub use collision::{resolve_candidates, resolve_pair, Contact, ContactParams, ContactStats};
pub use placement::{PlacementGenerator, PlacementReport};
