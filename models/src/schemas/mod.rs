pub mod broadcast;
pub mod response;
