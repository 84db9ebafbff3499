pub mod os_helper;
pub mod toml_date;
