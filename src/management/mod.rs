mod auth;
mod store;

pub use auth::AuthState;
pub use auth::OAuthManager;
pub use auth::Session;
pub use store::FileTokenStore;
pub use store::MemoryTokenStore;
pub use store::TokenStore;
