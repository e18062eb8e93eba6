pub mod active;
pub mod checkin;
pub mod checkout;
pub mod config;
pub mod db;
pub mod export;
pub mod init;
pub mod log;
pub mod serve;
pub mod stats;
pub mod student;
