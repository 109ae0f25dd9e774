pub mod annotation;
pub mod calibration;
pub mod cine;
pub mod config;
pub mod consts;
pub mod error;
pub mod geometry;
pub mod intensity;
pub mod measurement;
pub mod overlay;
pub mod report;
pub mod series;
pub mod session;
pub mod tools;
pub mod viewport;
