fn main() -> anyhow::Result<()> {
    waste_sorter::cli::run()
}
