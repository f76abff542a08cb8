//! Generates the NGAP APER types from the gNB-side ASN.1 module set

use std::env;
use std::path::PathBuf;

use asn1_compiler::generator::{Codec, Derive, Visibility};
use asn1_compiler::Asn1Compiler;

const SCHEMA: &str = "tools/ngap-17.9-gnb.asn";

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR not set"));
    let manifest_dir =
        PathBuf::from(env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not set"));
    let schema_path = manifest_dir
        .parent()
        .expect("crate lives inside the workspace")
        .join(SCHEMA);

    println!("cargo:rerun-if-changed={}", schema_path.display());
    println!("cargo:rerun-if-changed=build.rs");

    let output_file = out_dir.join("ngap.rs");

    let mut compiler = Asn1Compiler::new(
        output_file.to_str().expect("Invalid output path"),
        &Visibility::Public,
        vec![Codec::Aper],
        vec![Derive::Debug, Derive::Clone, Derive::PartialEq],
    );

    let schema_str = schema_path.to_str().expect("Invalid schema path");
    if let Err(e) = compiler.compile_files(&[schema_str]) {
        panic!("Failed to compile {SCHEMA}: {e}");
    }
}
