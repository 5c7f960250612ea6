pub mod config;
pub mod download;
pub mod google;
pub mod link;
pub mod locations;
pub mod months;
