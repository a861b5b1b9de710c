pub mod certificate_converter;
pub mod keystore_manager;
