use scalemark::init_logging;

fn main() {
    if let Err(error) = init_logging().and_then(|_| scalemark::run(std::env::args_os())) {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}
