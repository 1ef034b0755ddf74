// File: crates/wind-chart-core/build.rs
// Summary: Links the Windows registry library that Skia's font manager and ICU need.

fn main() {
    #[cfg(target_os = "windows")]
    {
        // RegOpenKeyExW and friends live in advapi32.
        println!("cargo:rustc-link-lib=advapi32");
    }
}
