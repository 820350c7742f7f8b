pub mod args;
pub mod exit_codes;
pub mod inspect_cmds;
pub mod repack_cmds;

#[cfg(test)]
#[path = "tests/cmds_tests.rs"]
mod cmds_tests;
