//! Interface layer exposing the domain services to the browser frontend.

pub mod rest;
