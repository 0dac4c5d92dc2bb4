pub mod ownership;
pub mod time_utils;
