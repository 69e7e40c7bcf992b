//! Relia Auth — session-token authentication, privilege-context
//! binding, login/logout, language resolution, and the module access
//! gate.

pub mod authenticator;
pub mod config;
pub mod error;
pub mod gate;
pub mod language;
pub mod password;
pub mod service;
pub mod token;

pub use authenticator::{Authenticator, RequestMeta};
pub use config::AuthConfig;
pub use error::{AuthError, ErrorKind};
pub use gate::ModuleGate;
pub use service::{AuthService, LoginInput, LoginOutput};
