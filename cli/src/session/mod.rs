//! Login and logout hooks called from `zlogin` and `zlogout`.
pub mod login;
pub mod logout;
