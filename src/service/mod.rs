pub mod chat_service;
pub mod report_service;
