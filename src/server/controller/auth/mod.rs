//! Registration, activation, password and OpenID sign in, sign out.

pub mod login;
pub mod openid;
pub mod signup;

pub static AUTH_TAG: &str = "auth";
