//! Интеграционные тесты для db-cli

pub mod cli_tests;
pub mod common;
pub mod pipeline_tests;
