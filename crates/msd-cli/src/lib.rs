//! Library components of the `msd` command-line host.

pub mod logging;
pub mod selection;
pub mod settings;
