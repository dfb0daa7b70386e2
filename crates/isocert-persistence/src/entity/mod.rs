//! `SeaORM` entities for the certification tables

pub mod prelude;

pub mod application;
pub mod company;
pub mod document;
pub mod qms_type;
