//! Account Handlers

pub(crate) mod login;
pub(crate) mod logout;
pub(crate) mod profile;
pub(crate) mod signup;
pub(crate) mod update_profile;
