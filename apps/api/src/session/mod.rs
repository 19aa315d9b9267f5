// Live interview sessions: one controller per session behind its own async
// mutex, a registry keyed by session id, and the service functions that
// drive remote calls and timers outside the lock.

pub mod controller;
pub mod handlers;
pub mod registry;
pub mod service;
