pub mod data_table;
pub mod login;
pub mod pages;
pub mod primitives;
pub mod resource_page;
pub mod schema_form;
pub mod shell;
pub mod subscription_form;
