pub mod process_file;
pub mod process_files;

pub use process_file::*;
pub use process_files::*;
