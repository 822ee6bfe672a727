//! Name resolution: ordinals, surnames, nicknames, succession histories

pub mod cache;
pub mod engine;
pub mod events;
pub mod kinship;
pub mod nickname;
pub mod numbering;
pub mod persist;
pub mod pool;
pub mod render;
pub mod roman;
pub mod succession;
pub mod surname;

pub use cache::DecorationCache;
pub use engine::NameEngine;
pub use events::LifecycleEvent;
pub use persist::SaveData;
pub use succession::SuccessionTracker;
