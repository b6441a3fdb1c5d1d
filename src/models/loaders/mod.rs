pub mod toml_loader;

pub use toml_loader::{load_all_task_files, load_task_file};
