//! Authentication service layer.
//!
//! Registration, password sign-in and OpenID sign-in. Session handling stays in the
//! controllers, these services only decide who the visitor is.

pub mod login;
pub mod openid;
pub mod signup;
