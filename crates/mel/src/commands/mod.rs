//! Command handlers, one module per subcommand.

pub mod completion;
pub mod config_cmd;
pub mod init;
pub mod merge;
pub mod new;
pub mod open;
pub mod pm;
pub mod run;
pub mod update;
pub mod version;
