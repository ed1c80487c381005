fn main() {
    match pageaudit::run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{}", pageaudit::format_error(&err));
            std::process::exit(1);
        }
    }
}
