//! Data Transfer Objects for the JSON endpoints.

pub mod health;
