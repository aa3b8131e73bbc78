use anyhow::Result;

fn main() -> Result<()> {
    fossa_pr_report::cli::run()
}
