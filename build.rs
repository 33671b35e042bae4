// build.rs
fn main() {
    // e.g. "Oct 15 2026"
    let date = chrono::Local::now().format("%b %e %Y");
    println!("cargo:rustc-env=JDT_BUILD_DATE={}", date);
    println!("cargo:rerun-if-changed=build.rs");
}
