// Reusable components live here.

pub mod loading_spinner;
pub mod notice_banner;
pub mod pagination;
pub mod side_nav;
