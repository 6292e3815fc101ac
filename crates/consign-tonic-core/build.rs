//! Builds the gRPC client and server code for the `ecommerce.proto`
//! definition using `tonic-prost-build`.
//!
//! The generated bindings land in the crate's `OUT_DIR` and are pulled in
//! via `tonic::include_proto!("ecommerce")`. A serialized file descriptor
//! set is emitted alongside them so the server can register the gRPC
//! reflection service.
use std::env;
use std::path::PathBuf;

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let descriptor_path = out_dir.join("ecommerce_descriptor.bin");

    let mut config = tonic_prost_build::Config::new();
    config.file_descriptor_set_path(&descriptor_path);

    tonic_prost_build::configure()
        .compile_with_config(config, &["proto/ecommerce.proto"], &["proto"])
        .unwrap();
}
