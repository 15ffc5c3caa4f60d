pub mod api;
pub mod components;
pub mod config;
pub mod format;
pub mod icons;
pub mod modal;
pub mod page_frame;
pub mod storage;
pub mod toast;
