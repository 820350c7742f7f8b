fn main() {
    std::process::exit(gamemusic_lib::run_inspect());
}
