pub mod home;
pub mod lan;
pub mod login;
pub mod not_found;
pub mod pvp;
pub mod settings;
