pub mod certificate_record;
pub mod keystore_handle;
pub mod navigation;
pub mod options;
pub mod outcome;
pub mod store_entry;
