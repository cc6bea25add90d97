//! jobmatch HTTP server library (router, handlers, error surface).

pub mod gateway;
