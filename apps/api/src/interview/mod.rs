// Interview: pure state machine, async session driver, in-memory store, HTTP handlers.

pub mod handlers;
pub mod machine;
pub mod session;
pub mod store;
