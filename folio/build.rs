/// `RUST_LOG_PRETTY=1 cargo build` switches the log output to the multi-line
/// pretty formatter.
fn main() {
    println!("cargo::rustc-check-cfg=cfg(tracing_pretty)");
    println!("cargo::rerun-if-env-changed=RUST_LOG_PRETTY");

    let pretty = std::env::var("RUST_LOG_PRETTY").is_ok_and(|value| value == "1");
    if pretty {
        println!("cargo::rustc-cfg=tracing_pretty");
    }
}
