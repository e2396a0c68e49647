pub mod keywords;
pub mod rank;
pub mod sections;
pub mod version;
