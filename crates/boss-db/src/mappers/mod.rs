//! Entity to model mappers
//!
//! `From<Model> for Entity` where every row is a valid entity, `TryFrom` where
//! a column carries a constrained value (time windows, flow directions).

mod company;
mod production;
mod resource;
mod user;
