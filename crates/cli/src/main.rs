fn main() -> anyhow::Result<()> {
    skillrec::run()
}
