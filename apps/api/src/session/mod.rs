// Per-session interaction history. In memory only; cleared on restart.

pub mod handlers;
pub mod history;
pub mod registry;
