//! Small helpers shared by the request path and the upstream clients.
//!
//! - [`http_url`] - Absolute `http`/`https` URL checks

pub mod http_url;
