pub mod html;
pub mod test_utils;
