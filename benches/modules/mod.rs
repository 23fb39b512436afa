pub mod search;
pub mod sort;
pub mod util;
