mod audio;
mod config;
mod library;
mod player;
mod runtime;

fn main() {
    if let Err(e) = runtime::run() {
        eprintln!("chordlink: {e}");
        std::process::exit(1);
    }
}
