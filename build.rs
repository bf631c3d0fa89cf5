include!("build/config.rs");

fn main() {
    println!("cargo:rerun-if-changed=build/config.rs");

    config::Cfgs::new().apply();
}
