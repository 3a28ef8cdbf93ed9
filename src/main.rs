fn main() -> Result<(), Box<dyn std::error::Error>> {
    cloudcfg::cli::main()
}
