mod cli_app;
mod cli_config;
mod cli_image;
mod common;
