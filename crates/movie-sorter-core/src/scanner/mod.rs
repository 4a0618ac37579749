mod walk;

pub use walk::{list_directories, list_movie_folders, FolderEntry};
