pub mod init;
pub mod score;
pub mod take;
pub mod tips;
