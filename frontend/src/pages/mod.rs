pub mod not_found;
pub mod resource_detail;
pub mod resource_list;
