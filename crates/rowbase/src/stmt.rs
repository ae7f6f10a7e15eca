mod find_all;
pub use find_all::FindAll;
