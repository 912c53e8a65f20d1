// handlers/mod.rs - Request handlers
//
// public: no token required (/, /health, /register, /login)
// data:   entity CRUD; the router decides which routes sit behind the token guard

pub mod data;
pub mod public;
