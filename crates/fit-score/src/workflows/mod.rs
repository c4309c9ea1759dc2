pub mod join;
pub mod screening;
