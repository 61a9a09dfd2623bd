pub mod domains;
pub mod schemas;
