// deadcut-cli/src/commands/mod.rs
//
// Command implementations for the deadcut CLI.

pub mod run;
