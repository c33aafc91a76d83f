pub mod error;
pub mod consts;
pub mod frame;
pub mod config;
pub mod io;
pub mod extract;
pub mod degrade;
pub mod compare;
pub mod corpus;
