fn main() {
    slint_build::compile("ui/popup.slint").expect("Slint build failed");
}
