use epochal::Cli;

fn main() -> anyhow::Result<()> {
    Cli::run()
}
