//! SurrealDB store implementations.

mod collector;
mod contact;
mod cursor;
mod session;
mod user;

pub use collector::SurrealCollectorStore;
pub use contact::SurrealContactStore;
pub use cursor::SurrealCursorStore;
pub use session::SurrealSessionStore;
pub use user::SurrealUserStore;
