pub mod home;
pub mod join;
pub mod not_found;
