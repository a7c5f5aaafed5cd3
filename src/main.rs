fn main() {
    if let Err(e) = medcare_lib::run() {
        eprintln!("medcare: {e}");
        std::process::exit(1);
    }
}
