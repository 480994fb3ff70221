//! Client-side authentication: the persisted session and the form that creates it.

pub mod form;
pub mod session;

pub use form::{AuthForm, FormFields, FormMode};
pub use session::{Session, SessionStore};
