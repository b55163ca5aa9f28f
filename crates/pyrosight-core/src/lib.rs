pub mod aim;
pub mod cluster;
pub mod config;
pub mod consts;
pub mod error;
pub mod field;
pub mod io;
pub mod pipeline;
pub mod projection;
pub mod segment;
