pub mod catalog;
pub mod config;
pub mod contract;
pub mod controller;
pub mod cursor;
pub mod logging;
pub mod matcher;
pub mod model;
pub mod ranker;
pub mod runtime;
pub mod transport;
pub mod weights;
pub mod weights_store;
