pub mod category_service;
pub mod daily_service;
pub mod filter_service;
pub mod ranking_service;
pub mod report_service;
