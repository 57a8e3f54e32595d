pub mod ai_config_handler;
pub mod quiz_handler;
