pub mod account;
pub mod logout;
pub mod not_found;
pub mod root;
pub mod upload;
