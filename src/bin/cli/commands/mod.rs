pub mod edit;
pub mod items;
pub mod password;
pub mod serve;
