fn main() {
    if let Err(err) = widervoc::run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
