pub mod credentials;
pub mod notification;
pub mod offline_store;
pub mod remote_gateway;
