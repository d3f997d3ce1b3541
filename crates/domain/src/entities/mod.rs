//! Domain entities - objects with identity and lifecycle.

mod challenge;
mod collected_item;
mod game_object;

pub use challenge::Challenge;
pub use collected_item::CollectedItem;
pub use game_object::GameObject;
