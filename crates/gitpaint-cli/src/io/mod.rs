pub mod git;
pub mod image_file;
