mod activate;
mod login;
mod openid;
mod signup;

use super::*;
