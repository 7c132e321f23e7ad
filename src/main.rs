fn main() {
    if let Err(err) = csv_typer::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
