pub mod convert;
pub mod dev;
pub mod init;
