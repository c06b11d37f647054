pub mod analysis;
pub mod db_loader;
pub mod excel;
