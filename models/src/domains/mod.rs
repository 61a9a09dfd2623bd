pub mod games;
pub mod rounds;
pub mod sea_orm_active_enums;
pub mod tournaments;
