//! Integration tests against the host filesystem

mod cli_parse;
mod os_scenarios;
mod save_load;
