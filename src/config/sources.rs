//! Configuration sources, applied in precedence order by the loader facade.

pub mod environment;
pub mod global_file;
pub mod workspace_file;
