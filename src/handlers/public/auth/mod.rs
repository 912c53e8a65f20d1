// handlers/public/auth/mod.rs - Public authentication handlers
//
// Account creation and token acquisition. Neither route requires a token.

pub mod login;    // POST /login - verify credentials and issue a token
pub mod register; // POST /register - create a new account

pub use login::login_post;
pub use register::register_post;
