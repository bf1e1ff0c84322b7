fn main() -> anyhow::Result<()> {
    yle_headlines_lib::run()
}
