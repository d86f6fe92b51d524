pub mod drill;
pub mod init;
pub mod languages;
pub mod source;
pub mod validate;
