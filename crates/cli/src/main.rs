fn main() {
    if let Err(e) = catscope_cli::run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
