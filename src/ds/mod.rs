pub mod arena;
pub mod dictionary;
pub mod hashset;
pub mod link;
pub mod list;
pub mod slot_arena;

pub use arena::LinkArena;
pub use dictionary::{DEFAULT_BUCKETS, Dictionary, MIN_BUCKETS, bucket_capacity};
pub use hashset::HashSet;
pub use link::{Chain, Link, Node, SentinelId};
pub use list::List;
pub use slot_arena::{SlotArena, SlotId};
