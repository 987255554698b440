pub mod fallback;
pub mod offline_service;
