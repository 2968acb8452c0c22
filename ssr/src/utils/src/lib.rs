pub mod data_url;
pub mod storage;
pub mod upload;
pub mod web;
