pub mod init;
pub mod plan;
pub mod schema;
