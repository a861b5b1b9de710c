pub mod store_codec;
