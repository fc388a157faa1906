//! In-memory marketplace store and conversation sessions

pub mod memory;
pub mod models;
pub mod session;

// Re-exports for convenience
pub use memory::MemoryStore;
pub use models::{NewOrder, NewUser, Order, OrderResponse, OrderStatus, PlatformStats, Profile, Review, Role, User};
pub use session::{Dialogue, Session, SessionStore};
