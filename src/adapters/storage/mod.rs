pub mod atomic_file;
