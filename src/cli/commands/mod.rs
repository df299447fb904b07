pub mod clear;
pub mod config;
pub mod export;
pub mod init;
pub mod logs;
pub mod serve;
pub mod settings;
pub mod submit;
