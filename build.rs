#[cfg(target_os = "windows")]
fn main() {
    use winresource::WindowsResource;

    // res/rcashoffer.ico must exist
    let mut res = WindowsResource::new();
    res.set_icon("res/rcashoffer.ico")
        .set("FileDescription", "rCashOffer CLI")
        .set("ProductName", "rCashOffer")
        .set("OriginalFilename", "rcashoffer.exe")
        .set("FileVersion", env!("CARGO_PKG_VERSION"))
        .set("ProductVersion", env!("CARGO_PKG_VERSION"))
        .compile()
        .expect("Failed to embed icon resource");
}

#[cfg(not(target_os = "windows"))]
fn main() {}
